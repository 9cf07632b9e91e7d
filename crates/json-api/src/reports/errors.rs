//! Report Errors

use salvo::http::StatusError;
use tracing::error;

use till_app::reports::ReportsServiceError;

pub(crate) fn into_status_error(error: ReportsServiceError) -> StatusError {
    match error {
        ReportsServiceError::Validation(reason) => StatusError::bad_request().brief(reason),
        ReportsServiceError::Sql(source) => {
            error!("report storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
