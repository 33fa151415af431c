use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entities::drug::Drug;
use crate::error::DrugLabelError;

pub const DEFAULT_SHELF_CAPACITY: usize = 10_000;

/// A bounded collection of drugs, unique by resolved name, kept in insertion
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct Shelf {
    drugs: Vec<Drug>,
    capacity: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShelfStats {
    /// `[name, last_updated]` of the most recently updated drug.
    pub newest_drug: Option<(String, String)>,
    pub average_risk_score: Option<f64>,
    pub average_total_fields: Option<f64>,
    /// Fraction of capacity in use, `0.0..=1.0`.
    pub percentage_full: f64,
}

impl Default for Shelf {
    fn default() -> Self {
        Self {
            drugs: Vec::new(),
            capacity: DEFAULT_SHELF_CAPACITY,
        }
    }
}

impl Shelf {
    pub fn new(capacity: usize) -> Result<Self, DrugLabelError> {
        if capacity < 1 {
            return Err(DrugLabelError::OutOfRange(
                "shelf capacity must be at least 1".into(),
            ));
        }
        Ok(Self {
            drugs: Vec::new(),
            capacity,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.drugs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drugs.is_empty()
    }

    /// A copy of the current contents; mutating it does not touch the shelf.
    pub fn drugs(&self) -> Vec<Drug> {
        self.drugs.clone()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.drugs.iter().any(|d| d.name() == Some(name))
    }

    pub fn add_drug(&mut self, drug: Drug) -> Result<(), DrugLabelError> {
        let Some(name) = drug.name() else {
            return Err(DrugLabelError::MissingName);
        };
        if self.contains(name) {
            return Err(DrugLabelError::DuplicateName(name.to_string()));
        }
        if self.drugs.len() >= self.capacity {
            return Err(DrugLabelError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        debug!(name, size = self.drugs.len() + 1, "drug added to shelf");
        self.drugs.push(drug);
        Ok(())
    }

    /// Removes the first drug whose resolved name equals `name`.
    pub fn remove_drug(&mut self, name: &str) -> Result<Drug, DrugLabelError> {
        let Some(index) = self.drugs.iter().position(|d| d.name() == Some(name)) else {
            return Err(DrugLabelError::NotFound(name.to_string()));
        };

        debug!(name, size = self.drugs.len() - 1, "drug removed from shelf");
        Ok(self.drugs.remove(index))
    }

    pub fn shelf_stats(&self) -> ShelfStats {
        if self.drugs.is_empty() {
            return ShelfStats {
                newest_drug: None,
                average_risk_score: None,
                average_total_fields: None,
                percentage_full: 0.0,
            };
        }

        let mut newest: Option<(&str, &str)> = None;
        let mut total_risk: u64 = 0;
        let mut total_fields: usize = 0;

        for drug in &self.drugs {
            if let Some(date) = drug.date() {
                // Strictly newer only, so the first of equal dates is kept.
                if newest.is_none_or(|(_, newest_date)| date > newest_date) {
                    newest = Some((drug.name().unwrap_or_default(), date));
                }
            }
            total_risk += u64::from(drug.risk_score().score);
            total_fields += drug.drug_comprehensive().len();
        }

        let count = self.drugs.len() as f64;
        ShelfStats {
            newest_drug: newest.map(|(name, date)| (name.to_string(), date.to_string())),
            average_risk_score: Some(total_risk as f64 / count),
            average_total_fields: Some(total_fields as f64 / count),
            percentage_full: count / self.capacity as f64,
        }
    }
}
