//! Reports service.

use async_trait::async_trait;
use jiff::{Timestamp, tz::TimeZone};
use mockall::automock;

use crate::{
    database::Db,
    domain::reports::{
        errors::ReportsServiceError,
        models::{
            CategorySales, DailySales, HourlySales, InventoryValue, PaymentMethodSales,
            ProductSales, ReportRange,
        },
        repository::PgReportsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgReportsService {
    db: Db,
    repository: PgReportsRepository,
}

impl PgReportsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgReportsRepository::new(),
        }
    }
}

/// Half-open timestamp bounds covering every day of the range.
fn bounds(range: ReportRange) -> Result<(Timestamp, Timestamp), ReportsServiceError> {
    if range.from > range.to {
        return Err(ReportsServiceError::Validation(
            "`from` must not be after `to`",
        ));
    }

    let since = range.from.to_zoned(TimeZone::UTC)?.timestamp();
    let until = range.to.tomorrow()?.to_zoned(TimeZone::UTC)?.timestamp();

    Ok((since, until))
}

#[async_trait]
impl ReportsService for PgReportsService {
    async fn sales_by_product(
        &self,
        range: ReportRange,
    ) -> Result<Vec<ProductSales>, ReportsServiceError> {
        let (since, until) = bounds(range)?;

        let mut tx = self.db.begin_read_only().await?;

        let rows = self
            .repository
            .sales_by_product(&mut tx, since, until)
            .await?;

        tx.commit().await?;

        Ok(rows)
    }

    async fn sales_by_category(
        &self,
        range: ReportRange,
    ) -> Result<Vec<CategorySales>, ReportsServiceError> {
        let (since, until) = bounds(range)?;

        let mut tx = self.db.begin_read_only().await?;

        let rows = self
            .repository
            .sales_by_category(&mut tx, since, until)
            .await?;

        tx.commit().await?;

        Ok(rows)
    }

    async fn sales_by_payment_method(
        &self,
        range: ReportRange,
    ) -> Result<Vec<PaymentMethodSales>, ReportsServiceError> {
        let (since, until) = bounds(range)?;

        let mut tx = self.db.begin_read_only().await?;

        let rows = self
            .repository
            .sales_by_payment_method(&mut tx, since, until)
            .await?;

        tx.commit().await?;

        Ok(rows)
    }

    async fn daily_sales(&self, range: ReportRange) -> Result<Vec<DailySales>, ReportsServiceError> {
        let (since, until) = bounds(range)?;

        let mut tx = self.db.begin_read_only().await?;

        let rows = self.repository.daily_sales(&mut tx, since, until).await?;

        tx.commit().await?;

        Ok(rows)
    }

    async fn hourly_sales(
        &self,
        range: ReportRange,
    ) -> Result<Vec<HourlySales>, ReportsServiceError> {
        let (since, until) = bounds(range)?;

        let mut tx = self.db.begin_read_only().await?;

        let rows = self.repository.hourly_sales(&mut tx, since, until).await?;

        tx.commit().await?;

        Ok(rows)
    }

    async fn inventory_valuation(&self) -> Result<Vec<InventoryValue>, ReportsServiceError> {
        let mut tx = self.db.begin_read_only().await?;

        let rows = self.repository.inventory_valuation(&mut tx).await?;

        tx.commit().await?;

        Ok(rows)
    }
}

#[automock]
#[async_trait]
pub trait ReportsService: Send + Sync {
    /// Quantity and revenue per product, highest revenue first.
    async fn sales_by_product(
        &self,
        range: ReportRange,
    ) -> Result<Vec<ProductSales>, ReportsServiceError>;

    /// Quantity and revenue per category, highest revenue first.
    async fn sales_by_category(
        &self,
        range: ReportRange,
    ) -> Result<Vec<CategorySales>, ReportsServiceError>;

    /// Order count and revenue per payment method, highest revenue first.
    async fn sales_by_payment_method(
        &self,
        range: ReportRange,
    ) -> Result<Vec<PaymentMethodSales>, ReportsServiceError>;

    /// Order count and revenue per UTC day, oldest first.
    async fn daily_sales(&self, range: ReportRange) -> Result<Vec<DailySales>, ReportsServiceError>;

    /// Order count and revenue per UTC hour of day, earliest hour first.
    ///
    /// Hours without sales are omitted.
    async fn hourly_sales(
        &self,
        range: ReportRange,
    ) -> Result<Vec<HourlySales>, ReportsServiceError>;

    async fn inventory_valuation(&self) -> Result<Vec<InventoryValue>, ReportsServiceError>;
}
