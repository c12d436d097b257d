//! Forex trading sessions, expressed in Paris local time.

use chrono::{DateTime, NaiveTime, Timelike, Utc};
use chrono_tz::Europe::Paris;
use serde::Serialize;

/// A market session's local opening window. `end` is exclusive; a window
/// with `start > end` wraps past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradingSession {
    pub name: &'static str,
    pub start_hour: u32,
    pub end_hour: u32,
}

pub const SESSIONS: [TradingSession; 4] = [
    TradingSession { name: "Sydney", start_hour: 22, end_hour: 7 },
    TradingSession { name: "Tokyo", start_hour: 0, end_hour: 9 },
    TradingSession { name: "London", start_hour: 8, end_hour: 17 },
    TradingSession { name: "New York", start_hour: 13, end_hour: 22 },
];

impl TradingSession {
    fn start(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.start_hour, 0, 0).unwrap_or(NaiveTime::MIN)
    }

    fn end(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.end_hour, 0, 0).unwrap_or(NaiveTime::MIN)
    }

    /// Whether the session is open at the given Paris wall-clock time.
    pub fn is_open_at(&self, local: NaiveTime) -> bool {
        let (start, end) = (self.start(), self.end());
        if start <= end {
            start <= local && local < end
        } else {
            local >= start || local < end
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStatus {
    pub name: &'static str,
    /// "HH:MM - HH:MM" in Paris time
    pub hours: String,
    pub open: bool,
}

/// Open/closed state of every session at `now`.
pub fn session_status(now: DateTime<Utc>) -> Vec<SessionStatus> {
    let local = now.with_timezone(&Paris);
    let time = NaiveTime::from_hms_opt(local.hour(), local.minute(), local.second())
        .unwrap_or(NaiveTime::MIN);
    SESSIONS
        .iter()
        .map(|s| SessionStatus {
            name: s.name,
            hours: format!("{:02}:00 - {:02}:00", s.start_hour, s.end_hour),
            open: s.is_open_at(time),
        })
        .collect()
}

/// Names of the sessions open at `now`.
pub fn open_sessions(now: DateTime<Utc>) -> Vec<&'static str> {
    session_status(now).into_iter().filter(|s| s.open).map(|s| s.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_winter_morning_only_london() {
        // 09:30 UTC is 10:30 in Paris (CET)
        assert_eq!(open_sessions(utc(2024, 1, 15, 9, 30)), vec!["London"]);
    }

    #[test]
    fn test_summer_evening_sydney_open_new_york_closed() {
        // 21:30 UTC is 23:30 in Paris (CEST)
        let status = session_status(utc(2024, 7, 15, 21, 30));
        let open: Vec<_> = status.iter().filter(|s| s.open).map(|s| s.name).collect();
        assert_eq!(open, vec!["Sydney"]);
        assert!(!status.iter().find(|s| s.name == "New York").unwrap().open);
    }

    #[test]
    fn test_window_bounds() {
        let london = SESSIONS[2];
        assert!(london.is_open_at(NaiveTime::from_hms_opt(8, 0, 0).unwrap()));
        assert!(!london.is_open_at(NaiveTime::from_hms_opt(17, 0, 0).unwrap()));

        let sydney = SESSIONS[0];
        assert!(sydney.is_open_at(NaiveTime::from_hms_opt(22, 0, 0).unwrap()));
        assert!(sydney.is_open_at(NaiveTime::from_hms_opt(3, 0, 0).unwrap()));
        assert!(!sydney.is_open_at(NaiveTime::from_hms_opt(7, 0, 0).unwrap()));
    }

    #[test]
    fn test_hours_label() {
        let status = session_status(utc(2024, 1, 15, 12, 0));
        assert_eq!(status[1].hours, "00:00 - 09:00");
        assert_eq!(status.len(), 4);
    }
}
