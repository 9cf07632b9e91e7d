//! Sales Report Handler

use std::{str::FromStr, sync::Arc};

use jiff::{Timestamp, civil::Date, tz::TimeZone};
use salvo::{
    oapi::{
        ToSchema,
        extract::{PathParam, QueryParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use till_app::reports::models::{
    CategorySales, DailySales, HourlySales, PaymentMethodSales, ProductSales, ReportRange,
};

use crate::{extensions::*, reports::errors::into_status_error, state::State};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportKind {
    Products,
    Categories,
    PaymentMethods,
    Daily,
    Hourly,
}

impl FromStr for ReportKind {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "products" => Ok(Self::Products),
            "categories" => Ok(Self::Categories),
            "payment-methods" => Ok(Self::PaymentMethods),
            "daily" => Ok(Self::Daily),
            "hourly" => Ok(Self::Hourly),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductSalesRow {
    pub product_uuid: Uuid,
    pub name: String,
    pub category: String,
    pub quantity: u64,
    pub revenue: u64,
}

impl From<ProductSales> for ProductSalesRow {
    fn from(row: ProductSales) -> Self {
        Self {
            product_uuid: row.product.into(),
            name: row.name,
            category: row.category,
            quantity: row.quantity,
            revenue: row.revenue,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategorySalesRow {
    pub category: String,
    pub quantity: u64,
    pub revenue: u64,
}

impl From<CategorySales> for CategorySalesRow {
    fn from(row: CategorySales) -> Self {
        Self {
            category: row.category,
            quantity: row.quantity,
            revenue: row.revenue,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentMethodSalesRow {
    pub payment_method: String,
    pub orders: u64,
    pub revenue: u64,
}

impl From<PaymentMethodSales> for PaymentMethodSalesRow {
    fn from(row: PaymentMethodSales) -> Self {
        Self {
            payment_method: row.payment_method.to_string(),
            orders: row.orders,
            revenue: row.revenue,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DailySalesRow {
    /// UTC calendar day, `YYYY-MM-DD`
    pub date: String,
    pub orders: u64,
    pub revenue: u64,
}

impl From<DailySales> for DailySalesRow {
    fn from(row: DailySales) -> Self {
        Self {
            date: row.date.to_string(),
            orders: row.orders,
            revenue: row.revenue,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct HourlySalesRow {
    /// UTC hour of day, `HH:00`
    pub hour: String,
    pub orders: u64,
    pub revenue: u64,
}

impl From<HourlySales> for HourlySalesRow {
    fn from(row: HourlySales) -> Self {
        Self {
            hour: format!("{:02}:00", row.hour),
            orders: row.orders,
            revenue: row.revenue,
        }
    }
}

/// Sales Report Response
///
/// Exactly one of the row lists is present, matching the requested kind.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct SalesReportResponse {
    /// First day of the report, inclusive
    pub from: String,

    /// Last day of the report, inclusive
    pub to: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<ProductSalesRow>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<CategorySalesRow>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_methods: Option<Vec<PaymentMethodSalesRow>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily: Option<Vec<DailySalesRow>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly: Option<Vec<HourlySalesRow>>,
}

fn today() -> Date {
    Timestamp::now().to_zoned(TimeZone::UTC).date()
}

/// Sales Report Handler
///
/// `kind` is one of `products`, `categories`, `payment-methods`, `daily` or
/// `hourly`.
/// `from` and `to` are inclusive `YYYY-MM-DD` UTC days and default to today.
#[endpoint(
    tags("reports"),
    summary = "Sales Report",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Report produced"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown report kind"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    kind: PathParam<String>,
    from: QueryParam<String, false>,
    to: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<SalesReportResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let kind = kind
        .into_inner()
        .parse::<ReportKind>()
        .map_err(|()| StatusError::not_found().brief("Unknown report kind"))?;

    let to = to.into_date("to")?.unwrap_or_else(today);

    let range = ReportRange {
        from: from.into_date("from")?.unwrap_or(to),
        to,
    };

    let reports = &state.app.reports;

    let mut response = SalesReportResponse {
        from: range.from.to_string(),
        to: range.to.to_string(),
        ..SalesReportResponse::default()
    };

    match kind {
        ReportKind::Products => {
            let rows = reports
                .sales_by_product(range)
                .await
                .map_err(into_status_error)?;

            response.products = Some(rows.into_iter().map(Into::into).collect());
        }
        ReportKind::Categories => {
            let rows = reports
                .sales_by_category(range)
                .await
                .map_err(into_status_error)?;

            response.categories = Some(rows.into_iter().map(Into::into).collect());
        }
        ReportKind::PaymentMethods => {
            let rows = reports
                .sales_by_payment_method(range)
                .await
                .map_err(into_status_error)?;

            response.payment_methods = Some(rows.into_iter().map(Into::into).collect());
        }
        ReportKind::Daily => {
            let rows = reports
                .daily_sales(range)
                .await
                .map_err(into_status_error)?;

            response.daily = Some(rows.into_iter().map(Into::into).collect());
        }
        ReportKind::Hourly => {
            let rows = reports
                .hourly_sales(range)
                .await
                .map_err(into_status_error)?;

            response.hourly = Some(rows.into_iter().map(Into::into).collect());
        }
    }

    Ok(Json(response))
}
