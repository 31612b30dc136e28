//! Date parameters for endpoints that refuse to answer without a period.

use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::endpoint::ParamValue;
use crate::error::ConfigError;

/// The period a run asks date-bound endpoints about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
  start: NaiveDate,
  end: NaiveDate,
}

impl DateWindow {
  /// The `days` days before `end`, up to and including `end`.
  ///
  /// Fails when the start would fall outside the representable calendar.
  pub fn new(end: NaiveDate, days: u32) -> Result<Self, ConfigError> {
    let start = end
      .checked_sub_signed(Duration::days(i64::from(days)))
      .ok_or(ConfigError::InvalidDateWindow { days })?;
    Ok(Self { start, end })
  }

  /// A window of `days` days ending today, in local time.
  pub fn ending_today(days: u32) -> Result<Self, ConfigError> {
    Self::new(Local::now().date_naive(), days)
  }

  pub fn start(&self) -> NaiveDate {
    self.start
  }

  /// Last day of the window (inclusive).
  pub fn end(&self) -> NaiveDate {
    self.end
  }
}

/// How an endpoint expects its date parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DateParams {
  /// Two parameters bounding the window, formatted `YYYY-MM-DD`.
  Range { start: String, end: String },
  /// One parameter set to the window end, formatted `YYYY-MM-DD`.
  Single { key: String },
  /// One parameter set to the window end's month, formatted `MM/YYYY`.
  MonthYear { key: String },
}

impl DateParams {
  pub fn resolve(&self, window: &DateWindow) -> Vec<(String, ParamValue)> {
    const DAY: &str = "%Y-%m-%d";

    match self {
      DateParams::Range { start, end } => vec![
        (start.clone(), window.start().format(DAY).to_string().into()),
        (end.clone(), window.end().format(DAY).to_string().into()),
      ],
      DateParams::Single { key } => {
        vec![(key.clone(), window.end().format(DAY).to_string().into())]
      }
      DateParams::MonthYear { key } => {
        vec![(key.clone(), window.end().format("%m/%Y").to_string().into())]
      }
    }
  }
}
