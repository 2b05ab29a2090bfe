//! Candle bucket granularities accepted by the kline endpoint.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MS_IN_MIN: i64 = 60_000;
const MS_IN_H: i64 = 60 * MS_IN_MIN;
const MS_IN_D: i64 = 24 * MS_IN_H;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "3m")]
    ThreeMinutes,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "30m")]
    ThirtyMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "2h")]
    TwoHours,
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "6h")]
    SixHours,
    #[serde(rename = "8h")]
    EightHours,
    #[serde(rename = "12h")]
    TwelveHours,
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "3d")]
    ThreeDays,
    #[serde(rename = "1w")]
    OneWeek,
    #[serde(rename = "1M")]
    OneMonth,
}

impl Timeframe {
    pub const ALL: [Timeframe; 15] = [
        Timeframe::OneMinute,
        Timeframe::ThreeMinutes,
        Timeframe::FiveMinutes,
        Timeframe::FifteenMinutes,
        Timeframe::ThirtyMinutes,
        Timeframe::OneHour,
        Timeframe::TwoHours,
        Timeframe::FourHours,
        Timeframe::SixHours,
        Timeframe::EightHours,
        Timeframe::TwelveHours,
        Timeframe::OneDay,
        Timeframe::ThreeDays,
        Timeframe::OneWeek,
        Timeframe::OneMonth,
    ];

    /// Candidates scanned when none are configured.
    pub fn default_scan_set() -> Vec<Timeframe> {
        vec![
            Timeframe::OneMinute,
            Timeframe::FiveMinutes,
            Timeframe::FifteenMinutes,
            Timeframe::ThirtyMinutes,
            Timeframe::OneHour,
            Timeframe::FourHours,
            Timeframe::OneDay,
        ]
    }

    /// Interval code used on the wire (`1m`, `4h`, `1M`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::OneMinute => "1m",
            Timeframe::ThreeMinutes => "3m",
            Timeframe::FiveMinutes => "5m",
            Timeframe::FifteenMinutes => "15m",
            Timeframe::ThirtyMinutes => "30m",
            Timeframe::OneHour => "1h",
            Timeframe::TwoHours => "2h",
            Timeframe::FourHours => "4h",
            Timeframe::SixHours => "6h",
            Timeframe::EightHours => "8h",
            Timeframe::TwelveHours => "12h",
            Timeframe::OneDay => "1d",
            Timeframe::ThreeDays => "3d",
            Timeframe::OneWeek => "1w",
            Timeframe::OneMonth => "1M",
        }
    }

    /// Nominal bucket length. Months are counted as 30 days.
    pub fn duration_ms(&self) -> i64 {
        match self {
            Timeframe::OneMinute => MS_IN_MIN,
            Timeframe::ThreeMinutes => 3 * MS_IN_MIN,
            Timeframe::FiveMinutes => 5 * MS_IN_MIN,
            Timeframe::FifteenMinutes => 15 * MS_IN_MIN,
            Timeframe::ThirtyMinutes => 30 * MS_IN_MIN,
            Timeframe::OneHour => MS_IN_H,
            Timeframe::TwoHours => 2 * MS_IN_H,
            Timeframe::FourHours => 4 * MS_IN_H,
            Timeframe::SixHours => 6 * MS_IN_H,
            Timeframe::EightHours => 8 * MS_IN_H,
            Timeframe::TwelveHours => 12 * MS_IN_H,
            Timeframe::OneDay => MS_IN_D,
            Timeframe::ThreeDays => 3 * MS_IN_D,
            Timeframe::OneWeek => 7 * MS_IN_D,
            Timeframe::OneMonth => 30 * MS_IN_D,
        }
    }

    /// Parse a comma separated list such as `"1h, 4h,1d"`. Empty items are skipped.
    pub fn parse_list(list: &str) -> Result<Vec<Timeframe>, UnknownTimeframe> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown timeframe {0:?}")]
pub struct UnknownTimeframe(pub String);

impl FromStr for Timeframe {
    type Err = UnknownTimeframe;

    // Case matters: "1m" is a minute, "1M" a month.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timeframe::ALL
            .iter()
            .copied()
            .find(|tf| tf.as_str() == s)
            .ok_or_else(|| UnknownTimeframe(s.to_string()))
    }
}
