//! # Clock（時刻プロバイダ）
//!
//! 申請の作成日時・更新日時をユースケース層で刻むための抽象化。
//! テストでは [`FixedClock`] を注入して日時を固定する。

use chrono::{DateTime, Utc};

/// 現在時刻を提供するトレイト
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// システム時刻
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 常に同じ時刻を返す実装
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clockは呼び出し時点の時刻を返す() {
        let before = Utc::now();
        let result = SystemClock.now();

        assert!(result >= before);
        assert!(result <= Utc::now());
    }

    #[test]
    fn test_fixed_clockは何度呼んでも同じ時刻を返す() {
        let fixed = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let clock = FixedClock::new(fixed);

        assert_eq!(clock.now(), fixed);
        assert_eq!(clock.now(), fixed);
    }
}
