//! Vehicle command handlers.

use tabled::Tabled;

use garagem_core::pages::{CategoryFilter, ImageListEditor, filter_vehicles};
use garagem_core::{NewVehicle, Vehicle, VehiclePatch};

use crate::cli::{
    GlobalOpts, VehicleAddArgs, VehicleUpdateArgs, VehiclesArgs, VehiclesCommand, VehiclesListArgs,
};
use crate::config::Backend;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct VehicleRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Brand")]
    brand: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Year")]
    year: String,
    #[tabled(rename = "Km")]
    mileage: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Images")]
    images: String,
}

impl output::Listable for Vehicle {
    type Row = VehicleRow;

    fn to_row(&self) -> VehicleRow {
        VehicleRow {
            id: self.id.clone(),
            brand: self.brand.clone(),
            model: self.model.clone(),
            year: self.year.clone(),
            mileage: self.mileage.to_string(),
            price: format!("{:.2}", self.price),
            category: self.category.to_string(),
            images: self.image_urls.len().to_string(),
        }
    }

    fn id(&self) -> String {
        self.id.clone()
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    backend: &Backend,
    args: VehiclesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        VehiclesCommand::List(list) => handle_list(backend, &list, global).await,
        VehiclesCommand::Add(add) => handle_add(backend, add, global).await,
        VehiclesCommand::Update(update) => handle_update(backend, update, global).await,
        VehiclesCommand::Delete { id } => handle_delete(backend, &id, global).await,
    }
}

async fn handle_list(
    backend: &Backend,
    list: &VehiclesListArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let all = backend.store.list_vehicles().await;
    let filter = list
        .category
        .map_or(CategoryFilter::All, |c| CategoryFilter::Only(c.into()));
    let visible = filter_vehicles(&all, filter, list.search.as_deref().unwrap_or(""));

    let out = output::render_list(&global.output, &visible);
    output::print_output(&out, global.quiet);
    Ok(())
}

async fn handle_add(
    backend: &Backend,
    add: VehicleAddArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    util::require_login(backend)?;

    let image_urls = build_image_list(&add.image_files, &add.image_urls, global).await?;

    let created = backend
        .store
        .create_vehicle(&NewVehicle {
            brand: add.brand,
            model: add.model,
            year: add.year,
            mileage: add.mileage,
            price: add.price,
            image_urls,
            category: add.category.into(),
        })
        .await
        .ok_or(CliError::OperationFailed {
            action: "Vehicle create".into(),
        })?;

    if !global.quiet {
        eprintln!("Vehicle created: {}", created.id);
    }
    Ok(())
}

async fn handle_update(
    backend: &Backend,
    update: VehicleUpdateArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    util::require_login(backend)?;

    let image_urls = if update.image_files.is_empty() && update.image_urls.is_empty() {
        None
    } else {
        Some(build_image_list(&update.image_files, &update.image_urls, global).await?)
    };

    let patch = VehiclePatch {
        brand: update.brand,
        model: update.model,
        year: update.year,
        mileage: update.mileage,
        price: update.price,
        image_urls,
        category: update.category.map(Into::into),
    };

    if patch.is_empty() {
        return Err(CliError::Validation {
            field: "update".into(),
            reason: "no fields to update were given".into(),
        });
    }

    if !backend.store.update_vehicle(&update.id, &patch).await {
        return Err(CliError::OperationFailed {
            action: format!("Vehicle update for '{}'", update.id),
        });
    }

    if !global.quiet {
        eprintln!("Vehicle updated");
    }
    Ok(())
}

async fn handle_delete(backend: &Backend, id: &str, global: &GlobalOpts) -> Result<(), CliError> {
    util::require_login(backend)?;

    if !util::confirm(
        &format!("Delete vehicle '{id}'? This is permanent."),
        global.yes,
    )? {
        return Ok(());
    }

    if !backend.store.delete_vehicle(id).await {
        return Err(CliError::OperationFailed {
            action: format!("Vehicle delete for '{id}'"),
        });
    }

    if !global.quiet {
        eprintln!("Vehicle deleted");
    }
    Ok(())
}

/// Assemble the image list from files (encoded inline) and external URLs,
/// in that order, enforcing the per-listing cap.
async fn build_image_list(
    files: &[std::path::PathBuf],
    urls: &[String],
    global: &GlobalOpts,
) -> Result<Vec<String>, CliError> {
    let mut editor = ImageListEditor::new();

    let outcome = editor
        .add_files(files)
        .await
        .map_err(CliError::from)?;
    if outcome.rejected > 0 && !global.quiet {
        eprintln!(
            "Warning: {} image(s) over the {}-image cap were skipped",
            outcome.rejected,
            garagem_core::MAX_IMAGES
        );
    }

    for url in urls {
        if !editor.add_url(url.clone()) && !global.quiet {
            eprintln!("Warning: image cap reached, skipping {url}");
        }
    }

    Ok(editor.into_urls())
}
