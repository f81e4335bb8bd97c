use serde::{Deserialize, Serialize};
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use crate::{
    domain::{Adjustment, AdjustmentPolicy, AllocationRule, Category, PeriodSeries, Threshold},
    errors::DataError,
};

/// Household roster and per-category allocation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub roster: Vec<String>,
    pub electric: ElectricConfig,
    pub water: SplitConfig,
    pub internet: SplitConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectricConfig {
    pub share_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjustment: Option<AdjustmentConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentConfig {
    pub person: String,
    /// Without a threshold the person's whole share is split evenly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<Threshold>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitConfig {
    pub share_count: u32,
    pub eligible: Vec<String>,
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|name| name.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            roster: names(&["Jack", "Ian", "Ajin", "Papa"]),
            electric: ElectricConfig {
                share_count: 3,
                adjustment: Some(AdjustmentConfig {
                    person: "Papa".into(),
                    threshold: Some(Threshold {
                        amount: 500.0,
                        beneficiary: "Ian".into(),
                    }),
                }),
            },
            water: SplitConfig {
                share_count: 3,
                eligible: names(&["Jack", "Ian", "Ajin"]),
            },
            internet: SplitConfig {
                share_count: 2,
                eligible: names(&["Jack", "Ian"]),
            },
            output_dir: None,
        }
    }
}

impl Config {
    /// Checks the settings against the roster.
    pub fn validate(&self) -> Result<(), DataError> {
        if self.roster.is_empty() {
            return Err(DataError::Config("roster must list at least one person".into()));
        }
        let roster: HashSet<&str> = self.roster.iter().map(String::as_str).collect();
        let require_listed = |person: &str, role: &str| {
            if roster.contains(person) {
                Ok(())
            } else {
                Err(DataError::Config(format!("{role} `{person}` is not on the roster")))
            }
        };

        for (category, share_count) in [
            (Category::Electric, self.electric.share_count),
            (Category::Water, self.water.share_count),
            (Category::Internet, self.internet.share_count),
        ] {
            if share_count == 0 {
                return Err(DataError::Config(format!(
                    "{category} share_count must be greater than zero"
                )));
            }
        }

        for (category, split) in [(Category::Water, &self.water), (Category::Internet, &self.internet)] {
            for person in &split.eligible {
                require_listed(person, format!("{category} participant").as_str())?;
            }
        }

        if let Some(adjustment) = &self.electric.adjustment {
            require_listed(&adjustment.person, "adjustment person")?;
            if let Some(threshold) = &adjustment.threshold {
                require_listed(&threshold.beneficiary, "threshold beneficiary")?;
                if threshold.beneficiary == adjustment.person {
                    return Err(DataError::Config(format!(
                        "threshold beneficiary `{}` must differ from the adjustment person",
                        threshold.beneficiary
                    )));
                }
                if !threshold.amount.is_finite() || threshold.amount < 0.0 {
                    return Err(DataError::Config(
                        "threshold amount must be a non-negative number".into(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Allocation rules in processing order: electric first since it
    /// discovers the participants, total last.
    pub fn rules(&self) -> Vec<AllocationRule> {
        let adjustment = self.electric.adjustment.as_ref().map(|adjustment| Adjustment {
            person: adjustment.person.clone(),
            policy: match &adjustment.threshold {
                Some(threshold) => AdjustmentPolicy::Threshold(threshold.clone()),
                None => AdjustmentPolicy::EvenSplit,
            },
        });
        vec![
            AllocationRule::ConsumptionBased {
                share_count: self.electric.share_count,
                adjustment,
            },
            AllocationRule::FixedSplit {
                category: Category::Water,
                share_count: self.water.share_count,
                eligible: self.water.eligible.clone(),
            },
            AllocationRule::FixedSplit {
                category: Category::Internet,
                share_count: self.internet.share_count,
                eligible: self.internet.eligible.clone(),
            },
            AllocationRule::Total,
        ]
    }

    /// Logs readings from people the roster does not know about.
    pub fn check_readings(&self, series: &PeriodSeries) {
        for person in series.current().readings.names() {
            if !self.roster.iter().any(|name| name == person) {
                tracing::warn!(%person, period = %series.current().label, "reading from a person not on the roster");
            }
        }
    }
}

/// Loads [`Config`] from a YAML file.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: Option<PathBuf>,
}

impl ConfigManager {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Reads and validates the configuration. Without a path the built-in
    /// household defaults are used.
    pub fn load(&self) -> Result<Config, DataError> {
        let config = match &self.path {
            Some(path) => {
                let data = fs::read_to_string(path).map_err(|source| DataError::Read {
                    path: path.clone(),
                    source,
                })?;
                serde_yaml::from_str(&data).map_err(|err| DataError::Parse {
                    path: path.clone(),
                    message: err.to_string(),
                })?
            }
            None => Config::default(),
        };
        config.validate()?;
        Ok(config)
    }
}
