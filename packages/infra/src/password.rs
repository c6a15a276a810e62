//! # パスワードハッシュ
//!
//! Argon2id によるハッシュ化と検証を提供する。
//!
//! - ハッシュ化: パスワードごとにランダムなソルトを生成し、PHC 文字列で返す
//! - 検証: argon2 クレートの定数時間比較を使う
//! - ダミー検証: 存在しないユーザーへのログインでも同じパラメータで検証を 1 回走らせ、
//!   応答時間からユーザーの有無を推測できないようにする

use argon2::{
    Algorithm,
    Argon2,
    Params,
    PasswordHasher as _,
    PasswordVerifier as _,
    Version,
    password_hash::{PasswordHash as Argon2PasswordHash, SaltString, rand_core::OsRng},
};
use gourmet_domain::password::{PasswordHash, PasswordVerifyResult, PlainPassword};

use crate::InfraError;

/// パスワードのハッシュ化と検証を担当するトレイト
pub trait PasswordChecker: Send + Sync {
    /// ランダムなソルトでハッシュ化する
    fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError>;

    /// ハッシュと照合する
    ///
    /// # Errors
    ///
    /// - ハッシュが PHC 文字列として解釈できない場合
    fn verify(
        &self,
        password: &PlainPassword,
        hash: &PasswordHash,
    ) -> Result<PasswordVerifyResult, InfraError>;

    /// ダミーハッシュに対して検証を実行する
    ///
    /// 結果は常に捨てる。ユーザーが見つからなかった経路の所要時間を揃えるためのもの。
    fn verify_dummy(&self, password: &PlainPassword);
}

/// Argon2id 実装
pub struct Argon2PasswordChecker {
    argon2:     Argon2<'static>,
    dummy_hash: PasswordHash,
}

impl Argon2PasswordChecker {
    /// OWASP 推奨パラメータ（m=64MiB, t=1, p=1）で作成する
    pub fn new() -> Result<Self, InfraError> {
        Self::with_params(65536, 1, 1)
    }

    /// パラメータを指定して作成する
    ///
    /// テストではメモリコストを下げて高速化する。
    pub fn with_params(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, InfraError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| InfraError::unexpected(format!("Argon2 パラメータが不正です: {e}")))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let dummy_hash = hash_with(&argon2, b"gourmet-dummy-password")?;

        Ok(Self { argon2, dummy_hash })
    }
}

fn hash_with(argon2: &Argon2<'_>, password: &[u8]) -> Result<PasswordHash, InfraError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2
        .hash_password(password, &salt)
        .map_err(|e| InfraError::unexpected(format!("パスワードのハッシュ化に失敗しました: {e}")))?;
    Ok(PasswordHash::new(hash.to_string()))
}

impl PasswordChecker for Argon2PasswordChecker {
    fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError> {
        hash_with(&self.argon2, password.as_str().as_bytes())
    }

    fn verify(
        &self,
        password: &PlainPassword,
        hash: &PasswordHash,
    ) -> Result<PasswordVerifyResult, InfraError> {
        let parsed = Argon2PasswordHash::new(hash.as_str())
            .map_err(|e| InfraError::unexpected(format!("不正なハッシュ形式: {e}")))?;

        let matched = self
            .argon2
            .verify_password(password.as_str().as_bytes(), &parsed)
            .is_ok();

        Ok(PasswordVerifyResult::from(matched))
    }

    fn verify_dummy(&self, password: &PlainPassword) {
        let _ = self.verify(password, &self.dummy_hash);
    }
}
