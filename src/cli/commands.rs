use crate::cli::args::{EditAction, EditArgs, FmtArgs, GraphArgs, LintArgs};
use crate::cli::CliContext;
use crate::core::catalog::{CatalogDefaults, DefinedComponent};
use crate::core::document::CamelDocument;
use crate::core::entities::{AddStepOptions, Entity, VisualEntity};
use crate::core::error::AppError;
use crate::core::lint::{LintRegistry, LintResult, LintSeverity};
use crate::core::model::StepKind;
use crate::core::transform::{parse_document, serialize_document, ParseOutcome};
use crate::core::types::{ErrorCategory, GraphFormat};
use crate::core::visualization::{render_tree, to_dot};
use crate::Result;
use anyhow::anyhow;
use serde::Serialize;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

fn read_document(context: &CliContext, path: &Path) -> Result<CamelDocument> {
    let text = fs::read_to_string(path).map_err(|e| {
        AppError::new(
            ErrorCategory::IoError,
            format!("Failed to read workflow {}: {}", path.display(), e),
        )
    })?;
    match parse_document(&text, &context.catalog).map_err(AppError::from)? {
        ParseOutcome::Supported(document) => Ok(document),
        ParseOutcome::Unsupported(reason) => Err(AppError::new(ErrorCategory::DocumentError, reason)
            .with_code("UNSUPPORTED_DOCUMENT")
            .with_context(path.display().to_string())
            .into()),
    }
}

fn emit_document(context: &CliContext, document: &CamelDocument, path: &Path, write: bool) -> Result<()> {
    let yaml = serialize_document(document, &context.catalog).map_err(AppError::from)?;
    if write {
        fs::write(path, yaml).map_err(|e| {
            AppError::new(
                ErrorCategory::IoError,
                format!("Failed to write workflow {}: {}", path.display(), e),
            )
        })?;
        println!("Updated {}", path.display());
    } else {
        print!("{}", yaml);
    }
    Ok(())
}

fn selected<'d>(
    document: &'d CamelDocument,
    id: Option<&str>,
) -> Result<Vec<&'d dyn VisualEntity>> {
    match id {
        Some(id) => document
            .entity(id)
            .map(|entity| vec![entity])
            .ok_or_else(|| anyhow!("Flow '{}' not found", id)),
        None => Ok(document.visual_entities().collect()),
    }
}

pub fn fmt(context: &CliContext, args: FmtArgs) -> Result<()> {
    tracing::info!("Formatting workflow: {}", args.file.display());
    let document = read_document(context, &args.file)?;
    emit_document(context, &document, &args.file, args.write)
}

pub fn graph(context: &CliContext, args: GraphArgs) -> Result<()> {
    let document = read_document(context, &args.file)?;
    let format = args.format.unwrap_or(context.config.output.graph_format);
    let entities = selected(&document, args.entity.as_deref())?;

    let mut graphs = Vec::new();
    for entity in entities {
        graphs.push((entity.id().to_string(), entity.to_graph(&context.catalog)?));
    }

    match format {
        GraphFormat::Tree => {
            for (_, graph) in &graphs {
                print!("{}", render_tree(graph));
            }
        }
        GraphFormat::Dot => {
            for (_, graph) in &graphs {
                println!("{}", to_dot(graph));
            }
        }
        GraphFormat::Json => {
            let rendered: Vec<Value> = graphs
                .iter()
                .map(|(id, graph)| json!({ "id": id, "graph": graph }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&rendered)?);
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct EntityLint<'a> {
    entity: &'a str,
    #[serde(flatten)]
    result: &'a LintResult,
}

pub fn lint(context: &CliContext, args: LintArgs) -> Result<()> {
    let document = read_document(context, &args.file)?;
    let registry = LintRegistry::new();

    let mut results = Vec::new();
    for entity in document.visual_entities() {
        for result in registry.run(entity.root(), &entity.root_path(), &context.catalog) {
            results.push((entity.id().to_string(), result));
        }
    }

    if args.json {
        let rendered: Vec<EntityLint<'_>> = results
            .iter()
            .map(|(entity, result)| EntityLint { entity, result })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rendered)?);
    } else if results.is_empty() {
        println!("No issues found.");
    } else {
        for (entity, result) in &results {
            let location = result.location.as_deref().unwrap_or(entity.as_str());
            println!("{} {} {}: {}", result.severity, result.code, location, result.message);
            if let Some(suggestion) = &result.suggestion {
                println!("    hint: {}", suggestion);
            }
        }
    }

    let errors = results
        .iter()
        .filter(|(_, result)| result.severity == LintSeverity::Error)
        .count();
    if errors > 0 {
        return Err(anyhow!("lint found {} error(s)", errors));
    }
    Ok(())
}

fn edit_failed(message: String) -> anyhow::Error {
    AppError::new(ErrorCategory::EditError, message)
        .with_code("EDIT_NO_OP")
        .with_suggestion("run `routeforge graph` to list valid node paths")
        .into()
}

pub fn edit(context: &CliContext, args: EditArgs) -> Result<()> {
    let mut document = if args.file.exists() {
        read_document(context, &args.file)?
    } else {
        CamelDocument::new(context.config.editor.default_document)
    };
    let defaults = CatalogDefaults::new(&context.catalog).with_id_digits(context.config.editor.id_digits);
    let catalog = &context.catalog;

    match args.action {
        EditAction::AddFlow { kind } => {
            let step_kind = StepKind::from_name(&kind)
                .filter(|kind| Entity::is_visual_kind(kind.name()))
                .ok_or_else(|| anyhow!("'{}' is not a flow kind", kind))?;
            let id = document
                .add_entity(step_kind, &defaults)
                .ok_or_else(|| edit_failed(format!("could not create a '{}' flow", kind)))?;
            tracing::info!("Added flow {}", id);
        }
        EditAction::RemoveFlow { id } => {
            if !document.remove_entity(&id) {
                return Err(edit_failed(format!("flow '{}' not found", id)));
            }
        }
        action => {
            let entity = match args.entity.as_deref() {
                Some(id) => document.entity_mut(id),
                None => document
                    .entities
                    .iter_mut()
                    .find_map(Entity::as_visual_mut),
            }
            .ok_or_else(|| anyhow!("no flow to edit; create one with `edit add-flow route`"))?;

            let changed = match &action {
                EditAction::Add {
                    target,
                    name,
                    component,
                    mode,
                } => {
                    let definition = if *component {
                        DefinedComponent::component(name)
                    } else {
                        DefinedComponent::processor(name)
                    };
                    let options = AddStepOptions {
                        definition,
                        mode: (*mode).into(),
                        target: target.clone(),
                    };
                    entity.add_step(&options, &defaults, catalog)
                }
                EditAction::Remove { path } => entity.remove_step(path, catalog),
                EditAction::Move { from, to } => entity.move_step(from, to, catalog),
                EditAction::Set { path, value } => {
                    let value: Value = serde_yaml::from_str(value).map_err(AppError::from)?;
                    entity.update_model(path, &value, catalog)
                }
                EditAction::AddFlow { .. } | EditAction::RemoveFlow { .. } => false,
            };
            if !changed {
                return Err(edit_failed("the edit did not change the document".to_string()));
            }
        }
    }

    emit_document(context, &document, &args.file, args.write)
}
