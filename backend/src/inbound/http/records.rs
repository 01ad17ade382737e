//! CRUD handlers shared by the five record collections.
//!
//! ```text
//! GET    /api/v1/vendors
//! POST   /api/v1/vendors {"name":"Metro Haulage","services":["pickup"],"status":"active"}
//! GET    /api/v1/vendors/{id}
//! PUT    /api/v1/vendors/{id}
//! DELETE /api/v1/vendors/{id}
//! ```
//!
//! The same routes exist for `/waste-points`, `/schedules`, `/invoices` and
//! `/certifications`. Handlers are generic over [`RecordCollection`], so they
//! are registered with [`record_scope`] rather than route macros.

use actix_web::{HttpResponse, Scope, web};

use crate::domain::{
    CertificationFields, InvoiceFields, Principal, RecordId, ScheduleFields, TenantRecord,
    VendorFields, WastePointFields,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::{HttpState, RecordCollection};
use crate::inbound::http::validation::{FieldName, parse_id};

const ID_FIELD: FieldName = FieldName::new("id");

fn record_id(raw: &str) -> ApiResult<RecordId> {
    parse_id(raw, ID_FIELD)
}

async fn list_records<F: RecordCollection>(
    state: web::Data<HttpState>,
    principal: Principal,
) -> ApiResult<web::Json<Vec<TenantRecord<F>>>> {
    let records = F::ports(&state)
        .query
        .list(principal.organization_id())
        .await?;
    Ok(web::Json(records))
}

async fn create_record<F: RecordCollection>(
    state: web::Data<HttpState>,
    principal: Principal,
    payload: web::Json<F>,
) -> ApiResult<HttpResponse> {
    let record = F::ports(&state)
        .command
        .create(principal.organization_id(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(record))
}

async fn get_record<F: RecordCollection>(
    state: web::Data<HttpState>,
    principal: Principal,
    path: web::Path<String>,
) -> ApiResult<web::Json<TenantRecord<F>>> {
    let id = record_id(&path)?;
    let record = F::ports(&state)
        .query
        .get(principal.organization_id(), &id)
        .await?;
    Ok(web::Json(record))
}

async fn replace_record<F: RecordCollection>(
    state: web::Data<HttpState>,
    principal: Principal,
    path: web::Path<String>,
    payload: web::Json<F>,
) -> ApiResult<web::Json<TenantRecord<F>>> {
    let id = record_id(&path)?;
    let record = F::ports(&state)
        .command
        .replace(principal.organization_id(), &id, payload.into_inner())
        .await?;
    Ok(web::Json(record))
}

async fn delete_record<F: RecordCollection>(
    state: web::Data<HttpState>,
    principal: Principal,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = record_id(&path)?;
    F::ports(&state)
        .command
        .delete(principal.organization_id(), &id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Routes for one collection mounted at `path`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use wasteflow::domain::VendorFields;
/// use wasteflow::inbound::http::records::record_scope;
///
/// let app = App::new().service(web::scope("/api/v1").service(record_scope::<VendorFields>("/vendors")));
/// ```
pub fn record_scope<F: RecordCollection>(path: &str) -> Scope {
    web::scope(path)
        .route("", web::get().to(list_records::<F>))
        .route("", web::post().to(create_record::<F>))
        .route("/{id}", web::get().to(get_record::<F>))
        .route("/{id}", web::put().to(replace_record::<F>))
        .route("/{id}", web::delete().to(delete_record::<F>))
}

/// Register every record collection on `cfg`.
pub fn configure_records(cfg: &mut web::ServiceConfig) {
    cfg.service(record_scope::<WastePointFields>("/waste-points"))
        .service(record_scope::<VendorFields>("/vendors"))
        .service(record_scope::<ScheduleFields>("/schedules"))
        .service(record_scope::<InvoiceFields>("/invoices"))
        .service(record_scope::<CertificationFields>("/certifications"));
}

#[cfg(test)]
#[path = "records_tests.rs"]
mod tests;
