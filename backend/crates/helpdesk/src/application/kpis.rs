//! KPI Service

use std::sync::Arc;

use chrono::NaiveDate;
use kernel::id::KpiId;
use kernel::text;

use crate::domain::entity::kpi::{Kpi, NewKpi};
use crate::domain::repository::KpiRepository;
use crate::domain::value_object::percentage::Percentage;
use crate::error::{HelpdeskError, HelpdeskResult};

const NAME_MAX_LENGTH: usize = 150;
const METHODOLOGY_MAX_LENGTH: usize = 5000;
const FREQUENCY_MAX_LENGTH: usize = 50;

/// Unvalidated KPI measurement
#[derive(Debug, Clone, Default)]
pub struct KpiInput {
    pub name: String,
    pub methodology: String,
    pub indicator_percentage: Option<f64>,
    pub frequency: String,
    /// `YYYY-MM-DD`
    pub measurement_date: String,
    pub achieved_percentage: Option<f64>,
}

impl KpiInput {
    fn validate(self) -> HelpdeskResult<NewKpi> {
        Ok(NewKpi {
            name: text::required("name", &self.name, NAME_MAX_LENGTH)?,
            methodology: text::required("methodology", &self.methodology, METHODOLOGY_MAX_LENGTH)?,
            indicator_percentage: percentage("indicatorPercentage", self.indicator_percentage)?,
            frequency: text::required("frequency", &self.frequency, FREQUENCY_MAX_LENGTH)?,
            measurement_date: parse_date(&self.measurement_date)?,
            achieved_percentage: percentage("achievedPercentage", self.achieved_percentage)?,
        })
    }
}

fn percentage(field: &'static str, value: Option<f64>) -> HelpdeskResult<Percentage> {
    let value = value.ok_or_else(|| HelpdeskError::Validation(format!("{field} is required")))?;
    Ok(Percentage::new(field, value)?)
}

fn parse_date(raw: &str) -> HelpdeskResult<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(HelpdeskError::Validation(
            "measurementDate is required".to_string(),
        ));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        HelpdeskError::Validation("measurementDate must be a date in YYYY-MM-DD format".to_string())
    })
}

pub struct KpiService<R>
where
    R: KpiRepository,
{
    repo: Arc<R>,
}

impl<R> KpiService<R>
where
    R: KpiRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, input: KpiInput) -> HelpdeskResult<Kpi> {
        let kpi = Kpi::record(input.validate()?);
        self.repo.create_kpi(&kpi).await?;

        tracing::info!(kpi_id = %kpi.kpi_id, status = kpi.status.as_str(), "KPI recorded");
        Ok(kpi)
    }

    pub async fn list(&self) -> HelpdeskResult<Vec<Kpi>> {
        self.repo.list_kpis().await
    }

    pub async fn get(&self, id: &KpiId) -> HelpdeskResult<Kpi> {
        self.repo
            .find_kpi(id)
            .await?
            .ok_or(HelpdeskError::NotFound("KPI"))
    }

    pub async fn delete(&self, id: &KpiId) -> HelpdeskResult<()> {
        if !self.repo.delete_kpi(id).await? {
            return Err(HelpdeskError::NotFound("KPI"));
        }
        tracing::info!(kpi_id = %id, "KPI deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::percentage::KpiStatus;
    use crate::infra::memory::InMemoryHelpdeskRepository;

    fn input(indicator: f64, achieved: f64) -> KpiInput {
        KpiInput {
            name: "First response time".to_string(),
            methodology: "Tickets answered within 4h / total".to_string(),
            indicator_percentage: Some(indicator),
            frequency: "Monthly".to_string(),
            measurement_date: "2026-09-30".to_string(),
            achieved_percentage: Some(achieved),
        }
    }

    #[tokio::test]
    async fn test_status_is_derived() {
        let service = KpiService::new(Arc::new(InMemoryHelpdeskRepository::new()));

        let met = service.create(input(90.0, 90.0)).await.unwrap();
        assert_eq!(met.status, KpiStatus::Met);

        let not_met = service.create(input(90.0, 72.5)).await.unwrap();
        assert_eq!(not_met.status, KpiStatus::NotMet);

        assert_eq!(service.get(&met.kpi_id).await.unwrap(), met);
        assert_eq!(service.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_validation() {
        let service = KpiService::new(Arc::new(InMemoryHelpdeskRepository::new()));

        let mut bad_date = input(90.0, 95.0);
        bad_date.measurement_date = "30/09/2026".to_string();
        assert!(matches!(
            service.create(bad_date).await,
            Err(HelpdeskError::Validation(_))
        ));

        let mut missing = input(90.0, 95.0);
        missing.achieved_percentage = None;
        assert!(matches!(
            service.create(missing).await,
            Err(HelpdeskError::Validation(msg)) if msg == "achievedPercentage is required"
        ));

        assert!(service.create(input(1000.0, 95.0)).await.is_err());
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_and_delete_missing() {
        let service = KpiService::new(Arc::new(InMemoryHelpdeskRepository::new()));
        assert!(matches!(
            service.get(&KpiId::new()).await,
            Err(HelpdeskError::NotFound(_))
        ));
        assert!(matches!(
            service.delete(&KpiId::new()).await,
            Err(HelpdeskError::NotFound(_))
        ));
    }
}
