//! # 認証ユースケース
//!
//! - ユーザー登録（パスワードは Argon2id でハッシュ化して保存）
//! - ログイン（照合成功でアクセストークンを発行）
//! - Basic 認証（設定済みユーザーとの照合）
//!
//! ## タイミング攻撃対策
//!
//! ユーザーが存在しない場合もダミーハッシュで検証を実行し、
//! ユーザーの有無で処理時間が変わらないようにする。
//!
//! Argon2id の計算は `spawn_blocking` で実行し、非同期ランタイムのワーカーを塞がない。

use std::sync::Arc;

use async_trait::async_trait;
use gourmet_domain::{
    password::{PasswordHash, PasswordVerifyResult, PlainPassword},
    user::{UserId, Username},
};
use gourmet_infra::{
    InfraError,
    credential_store::InMemoryCredentialStore,
    password::PasswordChecker,
    repository::UserRepository,
    token::TokenService,
};

use crate::error::{ApiError, AuthFailure};

/// 認証ユースケーストレイト
#[async_trait]
pub trait AuthUseCase: Send + Sync {
    /// ユーザーを登録する
    async fn register(&self, username: &str, password: &str) -> Result<UserId, ApiError>;

    /// 照合に成功したらアクセストークンを返す
    async fn login(&self, username: &str, password: &str) -> Result<String, ApiError>;
}

/// 認証ユースケースの実装
pub struct AuthUseCaseImpl {
    user_repository:  Arc<dyn UserRepository>,
    password_checker: Arc<dyn PasswordChecker>,
    token_service:    Arc<dyn TokenService>,
}

impl AuthUseCaseImpl {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_checker: Arc<dyn PasswordChecker>,
        token_service: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            user_repository,
            password_checker,
            token_service,
        }
    }
}

#[async_trait]
impl AuthUseCase for AuthUseCaseImpl {
    #[tracing::instrument(skip_all, fields(username = %username))]
    async fn register(&self, username: &str, password: &str) -> Result<UserId, ApiError> {
        let username = Username::new(username)?;
        let password = PlainPassword::new(password)?;

        let checker = Arc::clone(&self.password_checker);
        let hash = run_blocking(move || checker.hash(&password)).await??;

        match self.user_repository.insert(&username, &hash).await {
            Ok(id) => {
                tracing::info!(user_id = %id, "ユーザーを登録しました");
                Ok(id)
            }
            Err(e) if e.is_conflict() => Err(ApiError::Duplicate("User already exists".to_string())),
            Err(e) => Err(e.into()),
        }
    }

    #[tracing::instrument(skip_all, fields(username = %username))]
    async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let username = Username::new(username)?;
        let password = PlainPassword::new(password)?;

        let user = self.user_repository.find_by_username(&username).await?;
        let (user_id, hash) = match user {
            Some(user) => (Some(user.id()), Some(user.password_hash().clone())),
            None => (None, None),
        };

        let result =
            verify_or_dummy(Arc::clone(&self.password_checker), password, hash).await?;

        match (user_id, result) {
            (Some(id), PasswordVerifyResult::Match) => {
                let token = self.token_service.issue(id)?;
                tracing::info!(user_id = %id, "ログインに成功しました");
                Ok(token)
            }
            _ => {
                tracing::info!("ログインに失敗しました");
                Err(ApiError::Unauthenticated(AuthFailure::InvalidCredentials))
            }
        }
    }
}

/// Basic 認証ユースケース
pub struct BasicAuthUseCaseImpl {
    credential_store: Arc<InMemoryCredentialStore>,
    password_checker: Arc<dyn PasswordChecker>,
}

impl BasicAuthUseCaseImpl {
    pub fn new(
        credential_store: Arc<InMemoryCredentialStore>,
        password_checker: Arc<dyn PasswordChecker>,
    ) -> Self {
        Self {
            credential_store,
            password_checker,
        }
    }

    /// 資格情報を照合し、一致すればユーザー名を返す
    #[tracing::instrument(skip_all, level = "debug", fields(username = %username))]
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Username, ApiError> {
        let rejected = || ApiError::Unauthenticated(AuthFailure::BasicRejected);

        let Ok(password) = PlainPassword::new(password) else {
            return Err(rejected());
        };

        // ユーザー名は送られてきた文字列のまま照合する（前後空白も区別する）
        let hash = self.credential_store.find_password_hash(username).cloned();
        let result = verify_or_dummy(Arc::clone(&self.password_checker), password, hash).await?;

        if !result.is_match() {
            return Err(rejected());
        }
        Username::new(username).map_err(|_| rejected())
    }
}

/// ハッシュがあれば照合し、なければダミー検証を実行して不一致を返す
async fn verify_or_dummy(
    checker: Arc<dyn PasswordChecker>,
    password: PlainPassword,
    hash: Option<PasswordHash>,
) -> Result<PasswordVerifyResult, ApiError> {
    let result = run_blocking(move || match hash {
        Some(hash) => checker.verify(&password, &hash),
        None => {
            checker.verify_dummy(&password);
            Ok(PasswordVerifyResult::Mismatch)
        }
    })
    .await??;
    Ok(result)
}

/// CPU 負荷の高い処理をブロッキングスレッドで実行する
async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| InfraError::unexpected(format!("ブロッキングタスクが失敗しました: {e}")).into())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use gourmet_domain::user::User;
    use gourmet_infra::{password::Argon2PasswordChecker, token::TokenError};
    use pretty_assertions::assert_eq;

    use super::*;

    // テスト用スタブ

    #[derive(Default)]
    struct StubUserRepository {
        users: Mutex<Vec<User>>,
    }

    #[async_trait]
    impl UserRepository for StubUserRepository {
        async fn insert(
            &self,
            username: &Username,
            password_hash: &PasswordHash,
        ) -> Result<UserId, InfraError> {
            let mut users = self.users.lock().unwrap();
            if users.iter().any(|u| u.username() == username) {
                return Err(InfraError::conflict("User", username.as_str()));
            }
            let id = UserId::from_i64(users.len() as i64 + 1);
            users.push(User::from_db(id, username.clone(), password_hash.clone()));
            Ok(id)
        }

        async fn find_by_username(&self, username: &Username) -> Result<Option<User>, InfraError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.username() == username)
                .cloned())
        }
    }

    struct FailingUserRepository;

    #[async_trait]
    impl UserRepository for FailingUserRepository {
        async fn insert(&self, _: &Username, _: &PasswordHash) -> Result<UserId, InfraError> {
            Err(InfraError::unexpected("disk full"))
        }

        async fn find_by_username(&self, _: &Username) -> Result<Option<User>, InfraError> {
            Err(InfraError::unexpected("disk full"))
        }
    }

    /// ユーザー ID をそのまま埋め込むトークンサービス
    struct StubTokenService;

    impl TokenService for StubTokenService {
        fn issue(&self, user_id: UserId) -> Result<String, InfraError> {
            Ok(format!("token-{user_id}"))
        }

        fn validate(&self, _token: &str) -> Result<UserId, TokenError> {
            Err(TokenError::Invalid)
        }
    }

    fn checker() -> Arc<dyn PasswordChecker> {
        Arc::new(Argon2PasswordChecker::with_params(8, 1, 1).unwrap())
    }

    fn sut() -> AuthUseCaseImpl {
        AuthUseCaseImpl::new(
            Arc::new(StubUserRepository::default()),
            checker(),
            Arc::new(StubTokenService),
        )
    }

    #[tokio::test]
    async fn test_登録したユーザーでログインできる() {
        let sut = sut();

        let id = sut.register("alice", "p").await.unwrap();
        let token = sut.login("alice", "p").await.unwrap();

        assert_eq!(token, format!("token-{id}"));
    }

    #[tokio::test]
    async fn test_同じユーザー名の2回目の登録はduplicate() {
        let sut = sut();
        sut.register("alice", "p").await.unwrap();

        let err = sut.register(" alice ", "q").await.unwrap_err();

        assert!(matches!(err, ApiError::Duplicate(msg) if msg == "User already exists"));
    }

    #[tokio::test]
    async fn test_登録時の入力不正はvalidation() {
        let sut = sut();

        assert!(matches!(
            sut.register("", "p").await.unwrap_err(),
            ApiError::Validation(_)
        ));
        assert!(matches!(
            sut.register("alice", "").await.unwrap_err(),
            ApiError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn test_パスワード誤りはinvalid_credentials() {
        let sut = sut();
        sut.register("alice", "p").await.unwrap();

        let err = sut.login("alice", "wrong").await.unwrap_err();

        assert!(matches!(
            err,
            ApiError::Unauthenticated(AuthFailure::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_存在しないユーザーもinvalid_credentials() {
        let err = sut().login("ghost", "p").await.unwrap_err();

        assert!(matches!(
            err,
            ApiError::Unauthenticated(AuthFailure::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_リポジトリ障害はinternal() {
        let sut = AuthUseCaseImpl::new(
            Arc::new(FailingUserRepository),
            checker(),
            Arc::new(StubTokenService),
        );

        assert!(matches!(
            sut.register("alice", "p").await.unwrap_err(),
            ApiError::Internal(_)
        ));
        assert!(matches!(
            sut.login("alice", "p").await.unwrap_err(),
            ApiError::Internal(_)
        ));
    }

    fn basic_sut() -> BasicAuthUseCaseImpl {
        let checker = checker();
        let users = [(
            Username::new("user1").unwrap(),
            PlainPassword::new("password1").unwrap(),
        )];
        let store = InMemoryCredentialStore::from_pairs(&users, checker.as_ref()).unwrap();
        BasicAuthUseCaseImpl::new(Arc::new(store), checker)
    }

    #[tokio::test]
    async fn test_basic認証_成功でユーザー名を返す() {
        let name = basic_sut().authenticate("user1", "password1").await.unwrap();

        assert_eq!(name.as_str(), "user1");
    }

    #[tokio::test]
    async fn test_basic認証_失敗はbasic_rejected() {
        let sut = basic_sut();

        for (user, password) in [("user1", "nope"), ("user2", "password1"), ("", ""), ("user1", "")] {
            let err = sut.authenticate(user, password).await.unwrap_err();
            assert!(matches!(
                err,
                ApiError::Unauthenticated(AuthFailure::BasicRejected)
            ));
        }
    }

    #[tokio::test]
    async fn test_basic認証_前後に空白のあるユーザー名は別人として拒否する() {
        // Given
        let sut = basic_sut();

        // When
        let results = [
            sut.authenticate(" user1 ", "password1").await,
            sut.authenticate("user1\t", "password1").await,
        ];

        // Then
        for result in results {
            assert!(matches!(
                result,
                Err(ApiError::Unauthenticated(AuthFailure::BasicRejected))
            ));
        }
    }
}
