//! KPI Entity
//!
//! A measured service indicator. The status is derived once, when the
//! measurement is recorded.

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::KpiId;

use crate::domain::value_object::percentage::{KpiStatus, Percentage};

#[derive(Debug, Clone, PartialEq)]
pub struct Kpi {
    pub kpi_id: KpiId,
    pub name: String,
    pub methodology: String,
    pub indicator_percentage: Percentage,
    pub frequency: String,
    pub measurement_date: NaiveDate,
    pub achieved_percentage: Percentage,
    pub status: KpiStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated fields of a new measurement
#[derive(Debug, Clone)]
pub struct NewKpi {
    pub name: String,
    pub methodology: String,
    pub indicator_percentage: Percentage,
    pub frequency: String,
    pub measurement_date: NaiveDate,
    pub achieved_percentage: Percentage,
}

impl Kpi {
    pub fn record(new: NewKpi) -> Self {
        let now = Utc::now();
        Self {
            kpi_id: KpiId::new(),
            status: KpiStatus::evaluate(new.indicator_percentage, new.achieved_percentage),
            name: new.name,
            methodology: new.methodology,
            indicator_percentage: new.indicator_percentage,
            frequency: new.frequency,
            measurement_date: new.measurement_date,
            achieved_percentage: new.achieved_percentage,
            created_at: now,
            updated_at: now,
        }
    }
}
