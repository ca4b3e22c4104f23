use chrono::Local;
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use fieldlog::api::{CmdMessage, FieldlogApi, MessageLevel};
use fieldlog::config::FieldlogConfig;
use fieldlog::error::{FieldlogError, Result};
use fieldlog::link;
use fieldlog::model::{
    format_pipe_length, format_timestamp, quality_code, ProjectMeta, RunData, RunRecord, Sensors,
};
use fieldlog::store::fs::FileStore;
use std::io::Write;
use std::path::PathBuf;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands, RunArgs};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}

struct AppContext {
    api: FieldlogApi<FileStore>,
    config: FieldlogConfig,
    config_dir: PathBuf,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Commands::Open { project_code } => handle_open(&mut ctx, &project_code),
        Commands::Log {
            project_code,
            task,
            attempt,
            fields,
        } => handle_log(&mut ctx, &project_code, task, attempt, &fields),
        Commands::Edit {
            project_code,
            task,
            attempt,
            fields,
        } => handle_edit(&mut ctx, &project_code, task, attempt, &fields),
        Commands::NextAttempt { project_code, task } => handle_next(&ctx, &project_code, task),
        Commands::Show { project_code } => handle_show(&ctx, &project_code),
        Commands::Projects => handle_projects(&ctx),
        Commands::DeleteLast { project_code } => handle_delete_last(&mut ctx, &project_code),
        Commands::Clear { project_code } => handle_clear(&mut ctx, &project_code),
        Commands::ClearAll { yes } => handle_clear_all(&mut ctx, yes),
        Commands::Export { project_code, out } => handle_export(&ctx, &project_code, out),
        Commands::Locate { url } => handle_locate(&url),
        Commands::Config { key, value } => handle_config(&mut ctx, key, value),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let proj_dirs =
        ProjectDirs::from("com", "fieldlog", "fieldlog").expect("Could not determine config dir");
    let config_dir = proj_dirs.config_dir().to_path_buf();
    let config = FieldlogConfig::load(&config_dir).unwrap_or_default();

    let storage_root = cli
        .root
        .clone()
        .or_else(|| config.storage_root.clone())
        .unwrap_or_else(|| proj_dirs.data_dir().join("data"));

    let api = FieldlogApi::new(FileStore::new(storage_root));

    Ok(AppContext {
        api,
        config,
        config_dir,
    })
}

fn handle_open(ctx: &mut AppContext, project_code: &str) -> Result<()> {
    let result = ctx.api.open_project(project_code)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_log(
    ctx: &mut AppContext,
    project_code: &str,
    task: u32,
    attempt: Option<u32>,
    fields: &RunArgs,
) -> Result<()> {
    let attempt = match attempt {
        Some(n) => n,
        None => ctx
            .api
            .next_attempt(project_code, task)?
            .next_attempt
            .unwrap_or(1),
    };

    // Provision the folder first so the directory default points somewhere real
    ctx.api.open_project(project_code)?;

    let meta = build_meta(fields);
    let folder = ctx.api.storage_root().join(ctx.api.resolve_folder(project_code));
    let data = build_run_data(&folder.display().to_string(), task, attempt, fields, None);

    let result = ctx.api.upsert_run(project_code, &meta, &data)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(
    ctx: &mut AppContext,
    project_code: &str,
    task: u32,
    attempt: u32,
    fields: &RunArgs,
) -> Result<()> {
    let task_str = task.to_string();
    let attempt_str = attempt.to_string();

    // Edits must target an existing row; creation stays on `log`
    let existing = ctx
        .api
        .find_run(project_code, &task_str, &attempt_str)?
        .ok_or_else(|| {
            FieldlogError::Api(format!(
                "No entry found for task {}, attempt {}. Use 'fieldlog log' to create it first.",
                task_str, attempt_str
            ))
        })?;

    let meta = build_meta(fields);
    let folder = ctx.api.storage_root().join(ctx.api.resolve_folder(project_code));
    let data = build_run_data(
        &folder.display().to_string(),
        task,
        attempt,
        fields,
        Some(existing.to_run_data()),
    );

    let result = ctx.api.upsert_run(project_code, &meta, &data)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_next(ctx: &AppContext, project_code: &str, task: u32) -> Result<()> {
    let result = ctx.api.next_attempt(project_code, task)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &AppContext, project_code: &str) -> Result<()> {
    let result = ctx.api.show_rows(project_code)?;
    print_messages(&result.messages);
    print_rows(&result.listed_rows);
    Ok(())
}

fn handle_projects(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_projects()?;
    print_messages(&result.messages);
    for code in &result.projects {
        println!("{}", code);
    }
    Ok(())
}

fn handle_delete_last(ctx: &mut AppContext, project_code: &str) -> Result<()> {
    let result = ctx.api.delete_last(project_code)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_clear(ctx: &mut AppContext, project_code: &str) -> Result<()> {
    let result = ctx.api.clear_project(project_code)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_clear_all(ctx: &mut AppContext, yes: bool) -> Result<()> {
    if !yes {
        println!(
            "{}",
            "This permanently deletes all project data. Re-run with --yes to confirm.".yellow()
        );
        return Ok(());
    }
    let result = ctx.api.clear_all()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(ctx: &AppContext, project_code: &str, out: Option<PathBuf>) -> Result<()> {
    let result = ctx.api.export(project_code, out.as_deref())?;
    print_messages(&result.messages);
    if let Some(bytes) = result.exported {
        std::io::stdout()
            .write_all(&bytes)
            .map_err(FieldlogError::Io)?;
    }
    Ok(())
}

fn handle_locate(url: &str) -> Result<()> {
    match link::parse_coordinates(url) {
        Some((lat, lon)) => {
            println!("{}", format!("Lat: {:.6}  Lon: {:.6}", lat, lon).green());
            Ok(())
        }
        None => Err(FieldlogError::Api(
            "Could not extract coordinates from this link.".into(),
        )),
    }
}

fn handle_config(
    ctx: &mut AppContext,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    match (key.as_deref(), value) {
        (None, _) | (Some("storage-root"), None) => {
            match &ctx.config.storage_root {
                Some(root) => println!("storage-root: {}", root.display()),
                None => println!(
                    "storage-root: {} (default)",
                    ctx.api.storage_root().display()
                ),
            }
            Ok(())
        }
        (Some("storage-root"), Some(value)) => {
            ctx.config.storage_root = Some(PathBuf::from(&value));
            ctx.config.save(&ctx.config_dir)?;
            println!("{}", format!("storage-root set to {}", value).green());
            Ok(())
        }
        (Some(other), _) => Err(FieldlogError::Api(format!(
            "Unknown configuration key: {}",
            other
        ))),
    }
}

fn build_meta(fields: &RunArgs) -> ProjectMeta {
    let mut meta = ProjectMeta {
        client: trimmed(&fields.client),
        address: trimmed(&fields.address),
        project_description: trimmed(&fields.description),
        location_lat: trimmed(&fields.lat),
        location_lon: trimmed(&fields.lon),
        arcgis_link: trimmed(&fields.arcgis_link),
    };

    // A pasted map link can stand in for explicit coordinates
    if meta.location_lat.is_empty() && meta.location_lon.is_empty() {
        if let Some((lat, lon)) = link::parse_coordinates(&meta.arcgis_link) {
            meta.location_lat = format!("{:.6}", lat);
            meta.location_lon = format!("{:.6}", lon);
        }
    }
    meta
}

fn build_run_data(
    folder_path: &str,
    task: u32,
    attempt: u32,
    fields: &RunArgs,
    base: Option<RunData>,
) -> RunData {
    let mut data = base.unwrap_or_default();
    data.task_number = task.to_string();
    data.attempt_number = attempt.to_string();

    if let Some(v) = &fields.directory {
        data.directory_name = v.trim().to_string();
    } else if data.directory_name.is_empty() {
        data.directory_name = folder_path.to_string();
    }

    if fields.any_sensor() {
        data.data_type = Sensors {
            lidar: fields.lidar,
            csv: fields.csv_data,
            camera_360: fields.camera_360,
            ptz: fields.ptz,
        }
        .to_data_type();
    }

    overlay(&mut data.asset_id, &fields.asset_id);
    overlay(&mut data.asset_designation, &fields.asset_designation);
    overlay(&mut data.asset_type, &fields.asset_type);
    overlay(&mut data.deployment_platform, &fields.platform);
    overlay(&mut data.entry_point, &fields.entry);
    overlay(&mut data.exit_point, &fields.exit);
    overlay(&mut data.observation_summary, &fields.observation);
    overlay(&mut data.other_comments, &fields.comments);

    if let Some(v) = &fields.pipe_length {
        data.pipe_length = format_pipe_length(v);
    }
    if let Some(v) = &fields.start {
        data.date_start = resolve_timestamp(v);
    }
    if let Some(v) = &fields.stop {
        data.date_stop = resolve_timestamp(v);
    }
    if let Some(v) = &fields.quality {
        data.run_quality = quality_code(v);
    }

    // MANITOR enters and exits through the same structure
    if data.deployment_platform == "MANITOR" {
        data.exit_point = data.entry_point.clone();
    }

    data
}

fn overlay(slot: &mut String, value: &Option<String>) {
    if let Some(v) = value {
        *slot = v.trim().to_string();
    }
}

fn trimmed(value: &Option<String>) -> String {
    value.as_deref().unwrap_or_default().trim().to_string()
}

fn resolve_timestamp(value: &str) -> String {
    if value == "now" {
        format_timestamp(Local::now().naive_local())
    } else {
        value.trim().to_string()
    }
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

const OBSERVATION_PREVIEW: usize = 40;

fn print_rows(rows: &[RunRecord]) {
    if rows.is_empty() {
        return;
    }

    let header = ["Task", "Run", "Asset", "Platform", "Start", "Quality", "Observation"];
    let mut table: Vec<[String; 7]> = Vec::with_capacity(rows.len());
    for row in rows {
        let preview: String = row
            .observation_summary
            .chars()
            .take(OBSERVATION_PREVIEW)
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        table.push([
            row.task_number.clone(),
            row.attempt_number.clone(),
            row.asset_id.clone(),
            row.deployment_platform.clone(),
            row.date_start.clone(),
            row.run_quality.clone(),
            preview,
        ]);
    }

    let mut widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
    for cells in &table {
        for (i, cell) in cells.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }

    let pad = |cell: &str, width: usize| {
        format!("{}{}", cell, " ".repeat(width.saturating_sub(cell.width())))
    };

    let header_line = header
        .iter()
        .enumerate()
        .map(|(i, h)| pad(h, widths[i]))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{}", header_line.dimmed());

    for cells in &table {
        let line = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| pad(cell, widths[i]))
            .collect::<Vec<_>>()
            .join("  ");
        println!("{}", line);
    }
}
