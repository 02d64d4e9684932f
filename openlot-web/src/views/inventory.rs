//! Inventory views: grid, detail block, administration forms

use maud::{html, Markup, PreEscaped};
use openlot_shared::models::classification::Classification;
use openlot_shared::models::inventory::Vehicle;

use crate::validation::FieldError;
use crate::views::format::{format_currency, format_number};
use crate::views::layout;

/// Sticky values for the add/edit vehicle form
#[derive(Debug, Default)]
pub struct VehicleFormValues {
    pub classification_id: Option<i32>,
    pub inv_make: String,
    pub inv_model: String,
    pub inv_year: String,
    pub inv_description: String,
    pub inv_image: String,
    pub inv_thumbnail: String,
    pub inv_price: String,
    pub inv_miles: String,
    pub inv_color: String,
}

impl VehicleFormValues {
    /// Prefills the form from an existing vehicle, for the edit view
    pub fn from_vehicle(vehicle: &Vehicle) -> Self {
        Self {
            classification_id: Some(vehicle.classification_id),
            inv_make: vehicle.inv_make.clone(),
            inv_model: vehicle.inv_model.clone(),
            inv_year: vehicle.inv_year.trim().to_string(),
            inv_description: vehicle.inv_description.clone(),
            inv_image: vehicle.inv_image.clone(),
            inv_thumbnail: vehicle.inv_thumbnail.clone(),
            inv_price: vehicle.inv_price.to_string(),
            inv_miles: vehicle.inv_miles.to_string(),
            inv_color: vehicle.inv_color.clone(),
        }
    }
}

/// Classification dropdown, optionally pre-selecting one entry
pub fn classification_select(
    classifications: &[Classification],
    selected: Option<i32>,
) -> Markup {
    html! {
        select name="classification_id" id="classification_id" required {
            option value="" disabled selected[selected.is_none()] {
                "Choose a classification"
            }
            @for row in classifications {
                option value=(row.classification_id)
                       selected[selected == Some(row.classification_id)] {
                    (row.classification_name)
                }
            }
        }
    }
}

/// Vehicle grid for a classification listing
///
/// An empty result set renders the notice paragraph instead of an empty
/// container.
pub fn grid(vehicles: &[Vehicle]) -> Markup {
    html! {
        @if vehicles.is_empty() {
            p .notice { "Sorry, no matching vehicles could be found." }
        } @else {
            ul #inv-display {
                @for vehicle in vehicles {
                    li {
                        a href=(format!("/inv/detail/{}", vehicle.inv_id))
                          title=(format!("View {} {} details", vehicle.inv_make, vehicle.inv_model)) {
                            img src=(vehicle.inv_thumbnail)
                                alt=(format!("Image of {} {}", vehicle.inv_make, vehicle.inv_model));
                        }
                        div .name-price {
                            hr;
                            h2 {
                                a href=(format!("/inv/detail/{}", vehicle.inv_id))
                                  title=(format!("View {} {} details", vehicle.inv_make, vehicle.inv_model)) {
                                    (vehicle.inv_make) " " (vehicle.inv_model)
                                }
                            }
                            span { "$" (format_number(vehicle.inv_price.round() as i64)) }
                        }
                    }
                }
            }
        }
    }
}

/// Vehicle detail block for the detail page
pub fn detail(vehicle: &Vehicle) -> Markup {
    let year = vehicle.inv_year.trim();

    html! {
        div #inv-detail-container {
            div .vehicle-image {
                img src=(vehicle.inv_image)
                    alt=(format!("{} {} {}", year, vehicle.inv_make, vehicle.inv_model));
            }
            div .vehicle-details {
                h2 .vehicle-title { (year) " " (vehicle.inv_make) " " (vehicle.inv_model) }
                p .vehicle-price { (format_currency(vehicle.inv_price)) }
                div .vehicle-key-specs {
                    div .spec-item {
                        span .spec-label { "Mileage" }
                        span .spec-value { (format_number(vehicle.inv_miles as i64)) }
                    }
                }
                div .vehicle-description {
                    h3 { "Description" }
                    p { (vehicle.inv_description) }
                }
                div .vehicle-specs-table {
                    h3 { "Vehicle Specifications" }
                    div .spec-row {
                        span .spec-label { "Exterior Color:" }
                        span .spec-value { (vehicle.inv_color) }
                    }
                    div .spec-row {
                        span .spec-label { "Year:" }
                        span .spec-value { (year) }
                    }
                    div .spec-row {
                        span .spec-label { "Make:" }
                        span .spec-value { (vehicle.inv_make) }
                    }
                    div .spec-row {
                        span .spec-label { "Model:" }
                        span .spec-value { (vehicle.inv_model) }
                    }
                }
            }
        }
    }
}

/// Inventory management page
///
/// The table is filled client-side from the JSON endpoint when a
/// classification is chosen.
pub fn management(select: Markup) -> Markup {
    html! {
        ul .management-links {
            li { a href="/inv/add-classification" { "Add New Classification" } }
            li { a href="/inv/add-inventory" { "Add New Vehicle" } }
        }
        h2 { "Manage Inventory" }
        p { "Select a classification to see its vehicles." }
        (select)
        table #inventory-display {
            thead { tr { th { "Vehicle" } th {} th {} } }
            tbody {}
        }
        script { (PreEscaped(MANAGEMENT_SCRIPT)) }
    }
}

/// Fills the management table from /inv/getInventory/:classification_id
const MANAGEMENT_SCRIPT: &str = r##"
const select = document.querySelector("#classification_id");
select.addEventListener("change", () => {
  fetch("/inv/getInventory/" + select.value)
    .then((response) => response.json())
    .then((rows) => {
      let body = "";
      rows.forEach((v) => {
        body += "<tr><td>" + v.inv_make + " " + v.inv_model + "</td>";
        body += '<td><a href="/inv/edit/' + v.inv_id + '">Modify</a></td>';
        body += '<td><a href="/inv/delete/' + v.inv_id + '">Delete</a></td></tr>';
      });
      document.querySelector("#inventory-display tbody").innerHTML = body;
    });
});
"##;

/// Add-classification form
pub fn add_classification_form(value: &str, errors: &[FieldError]) -> Markup {
    html! {
        (layout::error_list(errors))
        form #add-classification-form method="post" action="/inv/add-classification" {
            fieldset {
                legend { "Add New Classification" }
                p .form-hint { "Name must be alphanumeric with no spaces or punctuation." }
                label for="classification_name" { "Classification name" }
                input type="text" name="classification_name" id="classification_name"
                      value=(value) required;
                button type="submit" { "Add Classification" }
            }
        }
    }
}

/// Shared add/edit vehicle form
///
/// `inv_id` is present only on the edit flow, carried in a hidden field.
pub fn vehicle_form(
    legend: &str,
    action: &str,
    submit_label: &str,
    inv_id: Option<i32>,
    select: Markup,
    values: &VehicleFormValues,
    errors: &[FieldError],
) -> Markup {
    html! {
        (layout::error_list(errors))
        form #vehicle-form method="post" action=(action) {
            fieldset {
                legend { (legend) }
                label for="classification_id" { "Classification" }
                (select)
                label for="inv_make" { "Make" }
                input type="text" name="inv_make" id="inv_make" value=(values.inv_make) required;
                label for="inv_model" { "Model" }
                input type="text" name="inv_model" id="inv_model" value=(values.inv_model) required;
                label for="inv_year" { "Year" }
                input type="text" name="inv_year" id="inv_year" value=(values.inv_year)
                      pattern="\\d{4}" required;
                label for="inv_description" { "Description" }
                textarea name="inv_description" id="inv_description" required {
                    (values.inv_description)
                }
                label for="inv_image" { "Image path" }
                input type="text" name="inv_image" id="inv_image" value=(values.inv_image) required;
                label for="inv_thumbnail" { "Thumbnail path" }
                input type="text" name="inv_thumbnail" id="inv_thumbnail"
                      value=(values.inv_thumbnail) required;
                label for="inv_price" { "Price" }
                input type="text" name="inv_price" id="inv_price" value=(values.inv_price) required;
                label for="inv_miles" { "Miles" }
                input type="text" name="inv_miles" id="inv_miles" value=(values.inv_miles) required;
                label for="inv_color" { "Color" }
                input type="text" name="inv_color" id="inv_color" value=(values.inv_color) required;
                @if let Some(inv_id) = inv_id {
                    input type="hidden" name="inv_id" value=(inv_id);
                }
                button type="submit" { (submit_label) }
            }
        }
    }
}

/// Delete-confirmation view: a static summary plus the confirming form
pub fn delete_confirm(vehicle: &Vehicle) -> Markup {
    html! {
        p .warning { "Confirm deletion. The delete is permanent." }
        dl .delete-summary {
            dt { "Vehicle" }
            dd { (vehicle.inv_year.trim()) " " (vehicle.inv_make) " " (vehicle.inv_model) }
            dt { "Price" }
            dd { (format_currency(vehicle.inv_price)) }
        }
        form #delete-vehicle-form method="post" action="/inv/delete" {
            input type="hidden" name="inv_id" value=(vehicle.inv_id);
            button type="submit" { "Delete Vehicle" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_vehicle() -> Vehicle {
        Vehicle {
            inv_id: 10,
            classification_id: 2,
            inv_make: "Jeep".to_string(),
            inv_model: "Wrangler".to_string(),
            inv_year: "2019".to_string(),
            inv_description: "Small block & <strong> tires".to_string(),
            inv_image: "/images/vehicles/wrangler.jpg".to_string(),
            inv_thumbnail: "/images/vehicles/wrangler-tn.jpg".to_string(),
            inv_price: 28045.0,
            inv_miles: 41205,
            inv_color: "Yellow".to_string(),
        }
    }

    #[test]
    fn test_grid_empty_shows_notice() {
        let markup = grid(&[]).into_string();
        assert!(markup.contains("Sorry, no matching vehicles could be found."));
        assert!(!markup.contains("inv-display"));
    }

    #[test]
    fn test_grid_renders_vehicle_links_and_price() {
        let markup = grid(&[sample_vehicle()]).into_string();
        assert!(markup.contains(r#"href="/inv/detail/10""#));
        assert!(markup.contains("$28,045"));
        assert!(markup.contains("Jeep"));
    }

    #[test]
    fn test_detail_formats_price_and_miles() {
        let markup = detail(&sample_vehicle()).into_string();
        assert!(markup.contains("$28,045.00"));
        assert!(markup.contains("41,205"));
        assert!(markup.contains("2019 Jeep Wrangler"));
    }

    #[test]
    fn test_detail_escapes_description() {
        let markup = detail(&sample_vehicle()).into_string();
        assert!(!markup.contains("<strong> tires"));
        assert!(markup.contains("&lt;strong&gt;"));
    }

    #[test]
    fn test_classification_select_preselects() {
        let classifications = vec![
            Classification {
                classification_id: 1,
                classification_name: "Sedan".to_string(),
            },
            Classification {
                classification_id: 2,
                classification_name: "SUV".to_string(),
            },
        ];

        let markup = classification_select(&classifications, Some(2)).into_string();
        assert!(markup.contains(r#"<option value="2" selected>SUV</option>"#));
        assert!(markup.contains(r#"<option value="1">Sedan</option>"#));
    }

    #[test]
    fn test_vehicle_form_carries_hidden_id_on_edit() {
        let values = VehicleFormValues::from_vehicle(&sample_vehicle());
        let select = classification_select(&[], values.classification_id);
        let markup = vehicle_form(
            "Edit Vehicle",
            "/inv/update",
            "Update Vehicle",
            Some(10),
            select,
            &values,
            &[],
        )
        .into_string();

        assert!(markup.contains(r#"name="inv_id" value="10""#));
        assert!(markup.contains(r#"value="Wrangler""#));
    }

    #[test]
    fn test_delete_confirm_names_vehicle() {
        let markup = delete_confirm(&sample_vehicle()).into_string();
        assert!(markup.contains("2019 Jeep Wrangler"));
        assert!(markup.contains(r#"action="/inv/delete""#));
    }
}
