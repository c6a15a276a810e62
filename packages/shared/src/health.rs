//! # ヘルスチェック共通型
//!
//! `/health` と `/health/ready` のレスポンス本体。

use std::collections::BTreeMap;

use serde::Serialize;

/// `/health` のレスポンス
///
/// ```
/// use gourmet_shared::HealthResponse;
///
/// let json = serde_json::to_value(HealthResponse::healthy("0.1.0")).unwrap();
/// assert_eq!(json["status"], "healthy");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status:  &'static str,
    /// Cargo.toml のバージョン
    pub version: &'static str,
}

impl HealthResponse {
    pub fn healthy(version: &'static str) -> Self {
        Self {
            status: "healthy",
            version,
        }
    }
}

/// 個別チェックの結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Ok,
    Error,
}

impl From<bool> for CheckStatus {
    fn from(passed: bool) -> Self {
        if passed { Self::Ok } else { Self::Error }
    }
}

/// Readiness 全体の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessStatus {
    Ready,
    NotReady,
}

/// `/health/ready` のレスポンス
///
/// `checks` はチェック名の順に並ぶ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadinessResponse {
    pub status: ReadinessStatus,
    pub checks: BTreeMap<&'static str, CheckStatus>,
}

impl ReadinessResponse {
    /// 個別チェック結果から全体の状態を導出する
    ///
    /// 1 つでも `Error` があれば `NotReady`。
    pub fn from_checks(checks: impl IntoIterator<Item = (&'static str, CheckStatus)>) -> Self {
        let checks: BTreeMap<_, _> = checks.into_iter().collect();
        let status = if checks.values().all(|c| *c == CheckStatus::Ok) {
            ReadinessStatus::Ready
        } else {
            ReadinessStatus::NotReady
        };
        Self { status, checks }
    }

    pub fn is_ready(&self) -> bool {
        self.status == ReadinessStatus::Ready
    }
}
