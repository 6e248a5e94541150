use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One named season and the calendar months it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonDef {
    pub name: String,
    pub months: Vec<u32>,
}

impl SeasonDef {
    pub fn new(name: impl Into<String>, months: &[u32]) -> Self {
        Self {
            name: name.into(),
            months: months.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeasonCalendarError {
    #[error("Season name must not be empty")]
    EmptyName,

    #[error("Duplicate season name: {0}")]
    DuplicateName(String),

    #[error("Month {month} in season {season} is outside 1..=12")]
    MonthOutOfRange { season: String, month: u32 },

    #[error("Month {month} is assigned to both {first} and {second}")]
    OverlappingMonth {
        month: u32,
        first: String,
        second: String,
    },
}

/// A season resolved for a given month: its display name and its rank within the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Season<'a> {
    pub name: &'a str,
    pub rank: u32,
}

/// Month → season mapping. Seasons rank in declaration order; a fallback season that was not
/// declared ranks after every declared one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonCalendar {
    names: Vec<String>,
    by_month: [usize; 12],
    fallback: usize,
}

impl SeasonCalendar {
    pub fn new(
        seasons: Vec<SeasonDef>,
        fallback: impl Into<String>,
    ) -> Result<Self, SeasonCalendarError> {
        let fallback = fallback.into();
        if fallback.trim().is_empty() {
            return Err(SeasonCalendarError::EmptyName);
        }

        let mut names: Vec<String> = Vec::with_capacity(seasons.len() + 1);
        let mut assigned: [Option<usize>; 12] = [None; 12];

        for season in &seasons {
            if season.name.trim().is_empty() {
                return Err(SeasonCalendarError::EmptyName);
            }
            if names.iter().any(|n| n == &season.name) {
                return Err(SeasonCalendarError::DuplicateName(season.name.clone()));
            }
            let idx = names.len();
            names.push(season.name.clone());

            for &month in &season.months {
                if !(1..=12).contains(&month) {
                    return Err(SeasonCalendarError::MonthOutOfRange {
                        season: season.name.clone(),
                        month,
                    });
                }
                let slot = &mut assigned[(month - 1) as usize];
                if let Some(prev) = *slot {
                    if prev != idx {
                        return Err(SeasonCalendarError::OverlappingMonth {
                            month,
                            first: names[prev].clone(),
                            second: season.name.clone(),
                        });
                    }
                }
                *slot = Some(idx);
            }
        }

        let fallback_idx = match names.iter().position(|n| n == &fallback) {
            Some(idx) => idx,
            None => {
                names.push(fallback);
                names.len() - 1
            }
        };

        let mut by_month = [fallback_idx; 12];
        for (slot, assigned) in by_month.iter_mut().zip(assigned.iter()) {
            if let Some(idx) = assigned {
                *slot = *idx;
            }
        }

        Ok(Self {
            names,
            by_month,
            fallback: fallback_idx,
        })
    }

    /// Season covering `month` (1..=12). Out-of-range months resolve to the fallback season.
    pub fn season_of(&self, month: u32) -> Season<'_> {
        let idx = (month as usize)
            .checked_sub(1)
            .and_then(|m| self.by_month.get(m).copied())
            .unwrap_or(self.fallback);
        Season {
            name: &self.names[idx],
            rank: idx as u32,
        }
    }

    /// Season names in rank order.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl Default for SeasonCalendar {
    /// Rabi (Nov–Feb), Summer (Mar–Jun), Kharif for every remaining month.
    fn default() -> Self {
        Self {
            names: vec!["Rabi".into(), "Summer".into(), "Kharif".into()],
            by_month: [0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 0, 0],
            fallback: 2,
        }
    }
}

pub fn default_seasons() -> Vec<SeasonDef> {
    vec![
        SeasonDef::new("Rabi", &[11, 12, 1, 2]),
        SeasonDef::new("Summer", &[3, 4, 5, 6]),
    ]
}

pub fn default_fallback_season() -> String {
    "Kharif".to_string()
}
