//! Inventory controllers: public browsing and staff administration
//!
//! # Endpoints
//!
//! - `GET  /inv/type/:classification_id` - vehicles in a classification
//! - `GET  /inv/detail/:inventory_id` - vehicle detail with reviews
//! - `GET  /inv/getInventory/:classification_id` - vehicles as JSON
//! - `GET  /inv/` - management page (employee/admin)
//! - `GET/POST /inv/add-classification` (employee/admin)
//! - `GET/POST /inv/add-inventory` (employee/admin)
//! - `GET  /inv/edit/:inventory_id`, `POST /inv/update` (employee/admin)
//! - `GET  /inv/delete/:inventory_id`, `POST /inv/delete` (employee/admin)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Extension, Form, Json,
};
use axum_extra::extract::SignedCookieJar;
use serde::Deserialize;
use validator::Validate;

use openlot_shared::models::classification::Classification;
use openlot_shared::models::inventory::{Vehicle, VehicleData};
use openlot_shared::models::review::Review;

use crate::{
    app::AppState,
    error::{AppError, AppResult},
    flash,
    middleware::identity::Identity,
    routes::site_nav,
    validation::{
        collect_errors, is_alphanumeric_name, is_four_digit_year, parse_int_min, parse_price,
        FieldError,
    },
    views::{
        self,
        inventory::VehicleFormValues,
        layout,
        review::ReviewFormValues,
    },
};

const LOST_PAGE: &str = "Sorry, we appear to have lost that page.";

/// Classification form payload
#[derive(Debug, Deserialize)]
pub struct ClassificationForm {
    pub classification_name: String,
}

/// Vehicle add/update form payload
///
/// Numeric fields arrive as strings and are parsed during validation so a
/// bad value becomes a field error instead of a rejected request.
#[derive(Debug, Deserialize, Validate)]
pub struct InventoryForm {
    /// Present only on the update flow
    pub inv_id: Option<String>,

    pub classification_id: String,

    #[validate(length(min = 1, message = "Make is required."))]
    pub inv_make: String,

    #[validate(length(min = 1, message = "Model is required."))]
    pub inv_model: String,

    pub inv_year: String,

    #[validate(length(min = 1, message = "Description is required."))]
    pub inv_description: String,

    #[validate(length(min = 1, message = "Image path is required."))]
    pub inv_image: String,

    #[validate(length(min = 1, message = "Thumbnail path is required."))]
    pub inv_thumbnail: String,

    pub inv_price: String,

    pub inv_miles: String,

    #[validate(length(min = 1, message = "Color is required."))]
    pub inv_color: String,
}

/// Delete form payload
#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    pub inv_id: String,
}

impl InventoryForm {
    fn values(&self) -> VehicleFormValues {
        VehicleFormValues {
            classification_id: parse_int_min(&self.classification_id, 1),
            inv_make: self.inv_make.trim().to_string(),
            inv_model: self.inv_model.trim().to_string(),
            inv_year: self.inv_year.trim().to_string(),
            inv_description: self.inv_description.trim().to_string(),
            inv_image: self.inv_image.trim().to_string(),
            inv_thumbnail: self.inv_thumbnail.trim().to_string(),
            inv_price: self.inv_price.trim().to_string(),
            inv_miles: self.inv_miles.trim().to_string(),
            inv_color: self.inv_color.trim().to_string(),
        }
    }

    /// Runs the full rule set, returning storable data or the error list
    fn validate_all(&self) -> Result<VehicleData, Vec<FieldError>> {
        let mut errors = collect_errors(self.validate());

        let classification_id = parse_int_min(&self.classification_id, 1);
        if classification_id.is_none() {
            errors.push(FieldError::new(
                "classification_id",
                "Classification is required.",
            ));
        }

        if !is_four_digit_year(&self.inv_year) {
            errors.push(FieldError::new("inv_year", "Year must be a 4-digit value."));
        }

        let price = parse_price(&self.inv_price);
        if price.is_none() {
            errors.push(FieldError::new(
                "inv_price",
                "Price must be a positive number.",
            ));
        }

        let miles = parse_int_min(&self.inv_miles, 0);
        if miles.is_none() {
            errors.push(FieldError::new(
                "inv_miles",
                "Miles must be a positive whole number.",
            ));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(VehicleData {
            classification_id: classification_id.unwrap_or_default(),
            inv_make: self.inv_make.trim().to_string(),
            inv_model: self.inv_model.trim().to_string(),
            inv_year: self.inv_year.trim().to_string(),
            inv_description: self.inv_description.trim().to_string(),
            inv_image: self.inv_image.trim().to_string(),
            inv_thumbnail: self.inv_thumbnail.trim().to_string(),
            inv_price: price.unwrap_or_default(),
            inv_miles: miles.unwrap_or_default(),
            inv_color: self.inv_color.trim().to_string(),
        })
    }
}

/// GET /inv/type/:classification_id
pub async fn build_by_classification(
    State(state): State<AppState>,
    identity: Option<Extension<Identity>>,
    Path(classification_id): Path<i32>,
    jar: SignedCookieJar,
) -> AppResult<Response> {
    let nav = site_nav(&state).await?;
    let (jar, notice) = flash::take_notice(jar);
    let identity = identity.as_ref().map(|Extension(identity)| identity);

    let classification = Classification::find_by_id(&state.db, classification_id)
        .await?
        .ok_or_else(|| AppError::NotFound(LOST_PAGE.to_string()))?;

    let vehicles = Vehicle::list_by_classification(&state.db, classification_id).await?;
    let title = format!("{} vehicles", classification.classification_name);

    let content = views::inventory::grid(&vehicles);
    let page = layout::page(&title, identity, nav, notice.as_deref(), content);
    Ok((jar, page).into_response())
}

/// GET /inv/detail/:inventory_id
pub async fn build_detail(
    State(state): State<AppState>,
    identity: Option<Extension<Identity>>,
    Path(inventory_id): Path<i32>,
    jar: SignedCookieJar,
) -> AppResult<Response> {
    let (jar, notice) = flash::take_notice(jar);
    let identity = identity.as_ref().map(|Extension(identity)| identity);

    render_detail_page(
        &state,
        identity,
        jar,
        inventory_id,
        &ReviewFormValues::default(),
        &[],
        notice,
        StatusCode::OK,
    )
    .await
}

/// Renders the full vehicle detail page: detail block, aggregate rating,
/// review list, and the add-review form where it applies
///
/// Shared by the detail route and by the review controller's validation and
/// failure paths, which must reconstitute the whole page around the
/// submitted values.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn render_detail_page(
    state: &AppState,
    identity: Option<&Identity>,
    jar: SignedCookieJar,
    inv_id: i32,
    values: &ReviewFormValues,
    errors: &[FieldError],
    notice: Option<String>,
    status: StatusCode,
) -> AppResult<Response> {
    let nav = site_nav(state).await?;

    let vehicle = Vehicle::find_by_id(&state.db, inv_id)
        .await?
        .ok_or_else(|| AppError::NotFound(LOST_PAGE.to_string()))?;

    let reviews = Review::list_by_inventory(&state.db, inv_id).await?;
    let summary = Review::rating_summary(&state.db, inv_id).await?;
    let has_reviewed = match identity {
        Some(identity) => Review::has_reviewed(&state.db, inv_id, identity.account_id).await?,
        None => false,
    };

    let title = format!(
        "{} {} {}",
        vehicle.inv_year.trim(),
        vehicle.inv_make,
        vehicle.inv_model
    );

    let content = maud::html! {
        (views::inventory::detail(&vehicle))
        (views::review::section(inv_id, &reviews, &summary, identity, has_reviewed, values, errors))
    };

    let page = layout::page(&title, identity, nav, notice.as_deref(), content);
    Ok((jar, (status, page)).into_response())
}

/// GET /inv/getInventory/:classification_id - structured list for the
/// management table
pub async fn inventory_json(
    State(state): State<AppState>,
    Path(classification_id): Path<i32>,
) -> AppResult<Json<Vec<Vehicle>>> {
    let vehicles = Vehicle::list_by_classification(&state.db, classification_id).await?;
    Ok(Json(vehicles))
}

/// GET /inv/ - management page
pub async fn management(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    jar: SignedCookieJar,
) -> AppResult<Response> {
    let nav = site_nav(&state).await?;
    let (jar, notice) = flash::take_notice(jar);

    let classifications = Classification::list_all(&state.db).await?;
    let select = views::inventory::classification_select(&classifications, None);

    let content = views::inventory::management(select);
    let page = layout::page(
        "Vehicle Management",
        Some(&identity),
        nav,
        notice.as_deref(),
        content,
    );
    Ok((jar, page).into_response())
}

/// Renders the management page directly with a notice, used after a
/// successful mutation so the fresh navigation shows up immediately
async fn render_management(
    state: &AppState,
    identity: &Identity,
    jar: SignedCookieJar,
    notice: &str,
    status: StatusCode,
) -> AppResult<Response> {
    let nav = site_nav(state).await?;
    let classifications = Classification::list_all(&state.db).await?;
    let select = views::inventory::classification_select(&classifications, None);

    let content = views::inventory::management(select);
    let page = layout::page("Vehicle Management", Some(identity), nav, Some(notice), content);
    Ok((jar, (status, page)).into_response())
}

/// GET /inv/add-classification
pub async fn build_add_classification(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    jar: SignedCookieJar,
) -> AppResult<Response> {
    let nav = site_nav(&state).await?;
    let (jar, notice) = flash::take_notice(jar);

    let content = views::inventory::add_classification_form("", &[]);
    let page = layout::page(
        "Add Classification",
        Some(&identity),
        nav,
        notice.as_deref(),
        content,
    );
    Ok((jar, page).into_response())
}

/// POST /inv/add-classification
pub async fn add_classification(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    jar: SignedCookieJar,
    Form(form): Form<ClassificationForm>,
) -> AppResult<Response> {
    let name = form.classification_name.trim();

    if !is_alphanumeric_name(name) {
        let nav = site_nav(&state).await?;
        let errors = vec![FieldError::new(
            "classification_name",
            "Classification name cannot contain spaces or special characters.",
        )];
        let content = views::inventory::add_classification_form(name, &errors);
        let page = layout::page("Add Classification", Some(&identity), nav, None, content);
        return Ok((jar, page).into_response());
    }

    match Classification::create(&state.db, name).await {
        Ok(classification) => {
            let notice = format!(
                "The {} classification was successfully added.",
                classification.classification_name
            );
            render_management(&state, &identity, jar, &notice, StatusCode::CREATED).await
        }
        Err(e) => {
            tracing::error!("classification insert failed: {}", e);
            let nav = site_nav(&state).await?;
            let content = views::inventory::add_classification_form(name, &[]);
            let page = layout::page(
                "Add Classification",
                Some(&identity),
                nav,
                Some("Sorry, adding the classification failed. Please try again."),
                content,
            );
            Ok((jar, (StatusCode::INTERNAL_SERVER_ERROR, page)).into_response())
        }
    }
}

/// GET /inv/add-inventory
pub async fn build_add_inventory(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    jar: SignedCookieJar,
) -> AppResult<Response> {
    let nav = site_nav(&state).await?;
    let (jar, notice) = flash::take_notice(jar);

    let classifications = Classification::list_all(&state.db).await?;
    let select = views::inventory::classification_select(&classifications, None);

    let content = views::inventory::vehicle_form(
        "Add New Vehicle",
        "/inv/add-inventory",
        "Add Vehicle",
        None,
        select,
        &VehicleFormValues::default(),
        &[],
    );
    let page = layout::page(
        "Add Inventory",
        Some(&identity),
        nav,
        notice.as_deref(),
        content,
    );
    Ok((jar, page).into_response())
}

/// POST /inv/add-inventory
pub async fn add_inventory(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    jar: SignedCookieJar,
    Form(form): Form<InventoryForm>,
) -> AppResult<Response> {
    let data = match form.validate_all() {
        Ok(data) => data,
        Err(errors) => {
            let nav = site_nav(&state).await?;
            let values = form.values();
            let classifications = Classification::list_all(&state.db).await?;
            let select =
                views::inventory::classification_select(&classifications, values.classification_id);

            let content = views::inventory::vehicle_form(
                "Add New Vehicle",
                "/inv/add-inventory",
                "Add Vehicle",
                None,
                select,
                &values,
                &errors,
            );
            let page = layout::page("Add Inventory", Some(&identity), nav, None, content);
            return Ok((jar, page).into_response());
        }
    };

    match Vehicle::create(&state.db, &data).await {
        Ok(vehicle) => {
            let notice = format!(
                "The {} {} was successfully added.",
                vehicle.inv_make, vehicle.inv_model
            );
            render_management(&state, &identity, jar, &notice, StatusCode::CREATED).await
        }
        Err(e) => {
            tracing::error!("vehicle insert failed: {}", e);
            let nav = site_nav(&state).await?;
            let values = form.values();
            let classifications = Classification::list_all(&state.db).await?;
            let select =
                views::inventory::classification_select(&classifications, values.classification_id);

            let content = views::inventory::vehicle_form(
                "Add New Vehicle",
                "/inv/add-inventory",
                "Add Vehicle",
                None,
                select,
                &values,
                &[],
            );
            let page = layout::page(
                "Add Inventory",
                Some(&identity),
                nav,
                Some("Sorry, the insert failed. Please try again."),
                content,
            );
            Ok((jar, (StatusCode::INTERNAL_SERVER_ERROR, page)).into_response())
        }
    }
}

/// GET /inv/edit/:inventory_id
pub async fn build_edit(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(inventory_id): Path<i32>,
    jar: SignedCookieJar,
) -> AppResult<Response> {
    let nav = site_nav(&state).await?;
    let (jar, notice) = flash::take_notice(jar);

    let vehicle = Vehicle::find_by_id(&state.db, inventory_id)
        .await?
        .ok_or_else(|| AppError::NotFound(LOST_PAGE.to_string()))?;

    let values = VehicleFormValues::from_vehicle(&vehicle);
    let classifications = Classification::list_all(&state.db).await?;
    let select = views::inventory::classification_select(&classifications, values.classification_id);

    let title = format!("Edit {} {}", vehicle.inv_make, vehicle.inv_model);
    let content = views::inventory::vehicle_form(
        &title,
        "/inv/update",
        "Update Vehicle",
        Some(vehicle.inv_id),
        select,
        &values,
        &[],
    );
    let page = layout::page(&title, Some(&identity), nav, notice.as_deref(), content);
    Ok((jar, page).into_response())
}

/// POST /inv/update
pub async fn update_inventory(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    jar: SignedCookieJar,
    Form(form): Form<InventoryForm>,
) -> AppResult<Response> {
    let inv_id = form
        .inv_id
        .as_deref()
        .and_then(|raw| parse_int_min(raw, 1))
        .ok_or_else(|| AppError::NotFound(LOST_PAGE.to_string()))?;

    let data = match form.validate_all() {
        Ok(data) => data,
        Err(errors) => {
            let nav = site_nav(&state).await?;
            let values = form.values();
            let classifications = Classification::list_all(&state.db).await?;
            let select =
                views::inventory::classification_select(&classifications, values.classification_id);
            return Ok(rerender_edit(
                jar,
                nav,
                select,
                &identity,
                inv_id,
                &values,
                &errors,
                None,
                StatusCode::OK,
            ));
        }
    };

    match Vehicle::update(&state.db, inv_id, &data).await {
        Ok(Some(vehicle)) => {
            let jar = flash::set_notice(
                jar,
                format!(
                    "The {} {} was successfully updated.",
                    vehicle.inv_make, vehicle.inv_model
                ),
            );
            Ok((jar, Redirect::to("/inv/")).into_response())
        }
        Ok(None) | Err(_) => {
            let nav = site_nav(&state).await?;
            let values = form.values();
            let classifications = Classification::list_all(&state.db).await?;
            let select =
                views::inventory::classification_select(&classifications, values.classification_id);
            Ok(rerender_edit(
                jar,
                nav,
                select,
                &identity,
                inv_id,
                &values,
                &[],
                Some("Sorry, the update failed. Please try again."),
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

/// Re-renders the edit form around the submitted values
#[allow(clippy::too_many_arguments)]
fn rerender_edit(
    jar: SignedCookieJar,
    nav: maud::Markup,
    select: maud::Markup,
    identity: &Identity,
    inv_id: i32,
    values: &VehicleFormValues,
    errors: &[FieldError],
    notice: Option<&str>,
    status: StatusCode,
) -> Response {
    let title = format!("Edit {} {}", values.inv_make, values.inv_model);
    let content = views::inventory::vehicle_form(
        &title,
        "/inv/update",
        "Update Vehicle",
        Some(inv_id),
        select,
        values,
        errors,
    );
    let page = layout::page(&title, Some(identity), nav, notice, content);
    (jar, (status, page)).into_response()
}

/// GET /inv/delete/:inventory_id - confirmation view
pub async fn build_delete(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(inventory_id): Path<i32>,
    jar: SignedCookieJar,
) -> AppResult<Response> {
    let nav = site_nav(&state).await?;
    let (jar, notice) = flash::take_notice(jar);

    let vehicle = Vehicle::find_by_id(&state.db, inventory_id)
        .await?
        .ok_or_else(|| AppError::NotFound(LOST_PAGE.to_string()))?;

    let title = format!("Delete {} {}", vehicle.inv_make, vehicle.inv_model);
    let content = views::inventory::delete_confirm(&vehicle);
    let page = layout::page(&title, Some(&identity), nav, notice.as_deref(), content);
    Ok((jar, page).into_response())
}

/// POST /inv/delete
pub async fn delete_inventory(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<DeleteForm>,
) -> AppResult<Response> {
    let inv_id = parse_int_min(&form.inv_id, 1)
        .ok_or_else(|| AppError::NotFound(LOST_PAGE.to_string()))?;

    match Vehicle::delete(&state.db, inv_id).await {
        Ok(true) => {
            let jar = flash::set_notice(jar, "The deletion was successful.");
            Ok((jar, Redirect::to("/inv/")).into_response())
        }
        Ok(false) => {
            let jar = flash::set_notice(jar, "Sorry, the delete failed. Please try again.");
            Ok((jar, Redirect::to(&format!("/inv/delete/{}", inv_id))).into_response())
        }
        Err(e) => {
            tracing::error!("vehicle delete failed: {}", e);
            let jar = flash::set_notice(jar, "Sorry, the delete failed. Please try again.");
            Ok((jar, Redirect::to(&format!("/inv/delete/{}", inv_id))).into_response())
        }
    }
}
