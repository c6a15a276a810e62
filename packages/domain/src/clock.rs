//! # Clock（時刻プロバイダ）
//!
//! トークンの発行時刻・有効期限判定で `Utc::now()` を直接呼ばず、
//! テストで任意の時刻を注入できるようにする。

use chrono::{DateTime, Utc};

/// 現在時刻を提供するトレイト
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// 現在時刻の UNIX 秒
    fn unix_timestamp(&self) -> i64 {
        self.now().timestamp()
    }
}

/// システム時刻を返す実装
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 固定時刻を返すテスト用実装
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// UNIX 秒から固定時刻を作る
    ///
    /// 範囲外の値は UNIX エポックに丸める。
    pub fn at_unix(seconds: i64) -> Self {
        Self::new(DateTime::from_timestamp(seconds, 0).unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_system_clockは呼び出し前後の時刻の間を返す() {
        let before = Utc::now();
        let result = SystemClock.now();
        let after = Utc::now();

        assert!(before <= result && result <= after);
    }

    #[test]
    fn test_fixed_clockのunix_timestampは指定した秒を返す() {
        let clock = FixedClock::at_unix(1_700_000_000);

        assert_eq!(clock.unix_timestamp(), 1_700_000_000);
        assert_eq!(clock.unix_timestamp(), clock.now().timestamp());
    }
}
