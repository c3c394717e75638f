use clap::ArgMatches;
use tracing::{error, info, warn};

use retitle_core::config::RetitleConfig;
use retitle_core::errors::RetitleError;
use retitle_core::events;
use retitle_core::sync::{SyncOutcome, TitleSync};
use retitle_core::title::{self, ViewSnapshot, WindowId};
use retitle_core::window::backends::x11;
use retitle_core::window::{self, WindowBackend, WindowHandle};

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    match matches.subcommand() {
        Some(("render", sub_matches)) => handle_render_command(sub_matches),
        Some(("sync", sub_matches)) => handle_sync_command(sub_matches),
        Some(("find", sub_matches)) => handle_find_command(sub_matches),
        Some(("set-title", sub_matches)) => handle_set_title_command(sub_matches),
        Some(("script", sub_matches)) => handle_script_command(sub_matches),
        Some(("backends", sub_matches)) => handle_backends_command(sub_matches),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}

/// Build a view snapshot from the shared view-state arguments.
fn view_from_matches(matches: &ArgMatches) -> ViewSnapshot {
    let window_id = matches.get_one::<u64>("window-id").copied().unwrap_or(0);
    let mut view = ViewSnapshot::new(WindowId(window_id)).dirty(matches.get_flag("dirty"));
    if let Some(name) = matches.get_one::<String>("name") {
        view = view.with_name(name.as_str());
    }
    if let Some(file) = matches.get_one::<String>("file") {
        view = view.with_file(file.as_str());
    }
    if let Some(project) = matches.get_one::<String>("project") {
        view = view.with_project_file(project.as_str());
    }
    if let Some(folders) = matches.get_many::<String>("folder") {
        for folder in folders {
            view = view.with_folder(folder.as_str());
        }
    }
    view
}

/// Load the config hierarchy, falling back to defaults when it is unreadable.
fn load_config() -> RetitleConfig {
    match RetitleConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: failed to load config ({}), using defaults", e);
            warn!(event = "cli.config_load_failed", error = %e);
            RetitleConfig::default()
        }
    }
}

/// Parse a handle in the form `find` prints, e.g. `x11:46137349` or
/// `win32:0x1a2b`. A bare decimal id belongs to the platform's own backend.
fn parse_handle(raw: &str) -> Result<WindowHandle, String> {
    let Some((kind, id)) = raw.split_once(':') else {
        return match std::env::consts::OS {
            "windows" => raw
                .parse::<isize>()
                .map(WindowHandle::Win32)
                .map_err(|_| format!("'{}' is not a window handle", raw)),
            _ => raw
                .parse::<u32>()
                .map(WindowHandle::X11)
                .map_err(|_| format!("'{}' is not a window handle", raw)),
        };
    };
    match kind {
        "x11" => id
            .parse::<u32>()
            .map(WindowHandle::X11)
            .map_err(|_| format!("'{}' is not an X11 window id", id)),
        "win32" => {
            let hex = id.strip_prefix("0x").unwrap_or(id);
            usize::from_str_radix(hex, 16)
                .map(|bits| WindowHandle::Win32(bits as isize))
                .map_err(|_| format!("'{}' is not a Win32 window handle", id))
        }
        other => Err(format!("unknown backend '{}' in window handle", other)),
    }
}

fn handle_render_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    let view = view_from_matches(matches);

    let mut config = load_config();
    if let Some(template) = matches.get_one::<String>("template") {
        config.title.template = template.clone();
    }

    info!(
        event = "cli.render_started",
        window_id = %view.window_id,
        json_output = json_output
    );

    match title::compute_rename_plan(&view, &config.title, title::host_home().as_deref()) {
        Ok(plan) => {
            if json_output {
                let output = serde_json::json!({
                    "official_title": plan.official_title,
                    "new_title": plan.new_title,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("Official title: {}", plan.official_title);
                println!("New title:      {}", plan.new_title);
            }
            info!(event = "cli.render_completed");
            Ok(())
        }
        Err(e) => {
            eprintln!("Failed to render titles: {}", e);
            error!(event = "cli.render_failed", error = %e, error_code = e.error_code());
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

fn handle_sync_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    let view = view_from_matches(matches);
    let config = load_config();

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        error!(event = "cli.sync_failed", error = %e, error_code = e.error_code());
        events::log_app_error(&e);
        return Err(e.into());
    }

    info!(
        event = "cli.sync_started",
        window_id = %view.window_id,
        dirty = view.is_dirty
    );

    let backend = match window::detect_backend(&config) {
        Ok(backend) => backend,
        Err(e) => {
            eprintln!("No usable window backend: {}", e);
            error!(event = "cli.sync_failed", error = %e, error_code = e.error_code());
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    let engine = TitleSync::new(&config, backend);
    match engine.on_host_ready(std::slice::from_ref(&view)) {
        Ok(outcomes) => {
            let outcome = outcomes.into_iter().next().unwrap_or(SyncOutcome::NotReady);
            report_outcome(outcome, json_output)?;
            if outcome == SyncOutcome::BackendFailed {
                error!(event = "cli.sync_failed", outcome = %outcome);
                return Err("backend failure, title not updated".into());
            }
            info!(event = "cli.sync_completed", outcome = %outcome);
            Ok(())
        }
        Err(e) => {
            eprintln!("Failed to sync window title: {}", e);
            error!(event = "cli.sync_failed", error = %e, error_code = e.error_code());
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

/// Print one pass outcome in the requested format.
fn report_outcome(
    outcome: SyncOutcome,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json_output {
        let output = match outcome {
            SyncOutcome::Renamed {
                windows,
                from_cache,
            } => serde_json::json!({
                "outcome": outcome.as_str(),
                "windows": windows,
                "from_cache": from_cache,
            }),
            other => serde_json::json!({ "outcome": other.as_str() }),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match outcome {
        SyncOutcome::Renamed {
            windows,
            from_cache: true,
        } => println!("Renamed {} window(s) via the cached handle", windows),
        SyncOutcome::Renamed {
            windows,
            from_cache: false,
        } => println!("Renamed {} window(s) after a title search", windows),
        SyncOutcome::NoMatch => println!("No window matched the official title"),
        SyncOutcome::BackendFailed => println!("Backend failed, title not updated"),
        SyncOutcome::Unchanged => println!("Dirty flag unchanged, nothing to do"),
        SyncOutcome::NotReady => println!("Engine not ready"),
    }
    Ok(())
}

fn handle_find_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let title_suffix = matches.get_one::<String>("title").unwrap();
    let json_output = matches.get_flag("json");
    let config = load_config();

    info!(
        event = "cli.find_started",
        title = %title_suffix,
        json_output = json_output
    );

    let backend = match window::detect_backend(&config) {
        Ok(backend) => backend,
        Err(e) => {
            eprintln!("No usable window backend: {}", e);
            error!(event = "cli.find_failed", error = %e, error_code = e.error_code());
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    if let Err(e) = backend.prepare() {
        eprintln!("Failed to prepare {} backend: {}", backend.name(), e);
        error!(event = "cli.find_failed", error = %e, error_code = e.error_code());
        events::log_app_error(&e);
        return Err(e.into());
    }

    match backend.find_windows(title_suffix) {
        Ok(handles) => {
            if json_output {
                let output = serde_json::json!({
                    "backend": backend.name(),
                    "matches": handles.iter().map(|h| h.to_string()).collect::<Vec<_>>(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else if handles.is_empty() {
                println!("No matching windows");
            } else {
                for handle in &handles {
                    println!("{}", handle);
                }
            }
            info!(event = "cli.find_completed", match_count = handles.len());
            Ok(())
        }
        Err(e) => {
            eprintln!("Failed to find windows: {}", e);
            error!(event = "cli.find_failed", error = %e, error_code = e.error_code());
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

fn handle_set_title_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let raw_handle = matches.get_one::<String>("handle").unwrap();
    let new_title = matches.get_one::<String>("title").unwrap();
    let config = load_config();

    info!(event = "cli.set_title_started", handle = %raw_handle);

    let handle = match parse_handle(raw_handle) {
        Ok(handle) => handle,
        Err(message) => {
            eprintln!("Invalid window handle: {}", message);
            error!(event = "cli.set_title_failed", error = %message);
            return Err(message.into());
        }
    };

    let backend = window::create_backend(handle.kind(), &config);
    match backend.set_title(handle, new_title) {
        Ok(()) => {
            println!("Set title of {} to '{}'", handle, new_title);
            info!(event = "cli.set_title_completed", handle = %handle);
            Ok(())
        }
        Err(e) => {
            eprintln!("Failed to set window title: {}", e);
            error!(event = "cli.set_title_failed", error = %e, error_code = e.error_code());
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

fn handle_script_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let install = matches.get_flag("install");
    let config = load_config();
    let script_path = config
        .window
        .script_path
        .clone()
        .unwrap_or_else(x11::default_script_path);

    info!(event = "cli.script_started", install = install);

    if !install {
        print!("{}", x11::script_body());
        info!(event = "cli.script_completed");
        return Ok(());
    }

    match x11::install_script(&script_path) {
        Ok(()) => {
            println!("Installed enumeration script at {}", script_path.display());
            info!(event = "cli.script_completed", path = %script_path.display());
            Ok(())
        }
        Err(e) => {
            eprintln!("Failed to install script: {}", e);
            error!(event = "cli.script_failed", error = %e, error_code = e.error_code());
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

fn handle_backends_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    let config = load_config();

    info!(event = "cli.backends_started", json_output = json_output);

    let backends: Vec<Box<dyn WindowBackend>> = window::backend_candidates()
        .iter()
        .map(|kind| window::create_backend(*kind, &config))
        .collect();

    if json_output {
        let entries: Vec<serde_json::Value> = backends
            .iter()
            .map(|backend| {
                serde_json::json!({
                    "name": backend.name(),
                    "display_name": backend.display_name(),
                    "available": backend.is_available(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for backend in &backends {
            let availability = if backend.is_available() {
                "available"
            } else {
                "unavailable"
            };
            println!(
                "{:<8} {} ({})",
                backend.name(),
                backend.display_name(),
                availability
            );
        }
    }

    info!(event = "cli.backends_completed", count = backends.len());
    Ok(())
}
