// Entry point and interactive menu.
//
// - Option [1] loads the reports export and prints load diagnostics.
// - Option [2] signs in as an admin or outlet user; the session is kept in a
//   file so it survives restarts.
// - Option [3] changes the month/category/date-range filter.
// - Options [4] and [5] render a dashboard and export its tables.
use anyhow::Context;
use chrono::{Datelike, Local};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

use outlet_report::access::{gate, Gate, Role, Route};
use outlet_report::config::AppConfig;
use outlet_report::filter::ALL_CATEGORIES;
use outlet_report::output::{export_dashboard, render_panel};
use outlet_report::session::{FileSessionStore, Session, SessionStore};
use outlet_report::util::{format_int, format_number, parse_date_safe};
use outlet_report::{loader, Dashboard, ReportFilter, ReportRecord};

struct App {
    config: AppConfig,
    sessions: FileSessionStore,
    data: Option<Vec<ReportRecord>>,
    filter: ReportFilter,
}

fn prompt(label: &str) -> String {
    print!("{}", label);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

fn read_choice() -> String {
    prompt("Enter choice: ")
}

/// Returns `true` if the user chose `Y`, `false` if they chose `N`.
fn prompt_back_to_menu() -> bool {
    loop {
        match prompt("Back to menu (Y/N): ").to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

fn handle_load(app: &mut App) {
    match loader::load_reports(&app.config.source) {
        Ok((data, load_report)) => {
            println!(
                "Processing reports... ({} rows read, {} loaded)",
                format_int(load_report.total_rows),
                format_int(load_report.loaded_rows)
            );
            if load_report.parse_errors > 0 {
                println!(
                    "Note: {} rows skipped as malformed.",
                    format_int(load_report.parse_errors)
                );
            }
            if load_report.undated_rows > 0 {
                println!(
                    "Note: {} rows have no usable date and are left out of daily charts.",
                    format_int(load_report.undated_rows)
                );
            }
            if load_report.coerced_fields > 0 {
                println!(
                    "Info: {} numeric fields were unreadable and counted as 0.",
                    format_int(load_report.coerced_fields)
                );
            }
            println!();
            app.data = Some(data);
        }
        Err(e) => eprintln!("Failed to load {}: {}\n", app.config.source.display(), e),
    }
}

fn handle_sign_in(app: &mut App) {
    let username = prompt("Username: ");
    if username.is_empty() {
        println!("Username is required.\n");
        return;
    }
    let Some(role) = Role::parse(&prompt("Role (admin/outlet): ")) else {
        println!("Unknown role.\n");
        return;
    };
    let session = match role {
        Role::Admin => Session::admin(username),
        Role::Outlet => {
            let outlet = prompt("Outlet name: ");
            if outlet.is_empty() {
                println!("Outlet users must name their outlet.\n");
                return;
            }
            Session::outlet(username, outlet)
        }
    };
    match app.sessions.init(session) {
        Ok(()) => println!("Signed in.\n"),
        Err(e) => eprintln!("Could not save session: {}\n", e),
    }
}

fn handle_sign_out(app: &mut App) {
    match app.sessions.clear() {
        Ok(()) => println!("Signed out.\n"),
        Err(e) => eprintln!("Could not clear session: {}\n", e),
    }
}

fn handle_filters(app: &mut App) {
    let f = &mut app.filter;
    let month = prompt(&format!("Month 1-12 [{}]: ", f.month));
    if let Ok(m) = month.parse::<u32>() {
        if (1..=12).contains(&m) {
            f.month = m;
        } else {
            println!("Month out of range, keeping {}.", f.month);
        }
    }
    if let Ok(y) = prompt(&format!("Year [{}]: ", f.year)).parse::<i32>() {
        f.year = y;
    }
    let category = prompt(&format!("Category or {} [{}]: ", ALL_CATEGORIES, f.category));
    if !category.is_empty() {
        f.category = category;
    }
    let start = parse_date_safe(Some(prompt("Start date YYYY-MM-DD (blank for none): ").as_str()));
    let end = parse_date_safe(Some(prompt("End date YYYY-MM-DD (blank for none): ").as_str()));
    f.start_date = start;
    f.end_date = end;
    let outlet = prompt("Outlet name contains (blank for all): ");
    f.outlet = if outlet.is_empty() { None } else { Some(outlet) };
    println!();
}

fn handle_dashboard(app: &App, requested: Route) {
    let Some(data) = app.data.as_deref() else {
        println!("Error: No reports loaded. Please load the file first (option 1).\n");
        return;
    };
    let session = match app.sessions.read() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Could not read session: {}\n", e);
            return;
        }
    };
    let route = match gate(session.as_ref(), requested) {
        Gate::Allow => requested,
        Gate::Redirect(Route::Login) => {
            println!("Please sign in first (option 2).\n");
            return;
        }
        Gate::Redirect(other) => {
            println!("Redirecting to your dashboard.");
            other
        }
    };
    let Some(session) = session else { return };

    let dashboard = Dashboard::build(data, &app.filter, &session, &app.config.metrics);
    let title = match route {
        Route::AdminDashboard => "Admin Dashboard".to_string(),
        _ => format!(
            "Outlet Dashboard: {}",
            session.outlet_name.as_deref().unwrap_or("-")
        ),
    };
    let s = &dashboard.summary;
    println!("{} ({:02}/{})", title, dashboard.month, dashboard.year);
    println!("Category: {}\n", app.filter.category);
    println!("Total F&B revenue:    {}", format_number(s.total_fnb_revenue, 0));
    println!("Total cinema revenue: {}", format_number(s.total_cinema_revenue, 0));
    println!("Total sales:          {}", format_number(s.total_sales, 0));
    println!(
        "Audience / target:    {} / {}",
        format_int(s.total_audience),
        format_int(s.total_target_headcount)
    );
    println!("Avg DS:               {}%", format_number(s.avg_ds_percentage, 1));
    println!("Avg achievement:      {}%", format_number(s.avg_achievement_percentage, 1));
    println!("Reports:              {}\n", format_int(s.record_count));

    let active: Vec<_> = dashboard.daily.iter().filter(|b| b.has_data).cloned().collect();
    let heading = format!("Daily performance, {} days", dashboard.daily.len());
    println!("{}", render_panel(&heading, &active, 7));
    println!("{}", render_panel("Category breakdown", &dashboard.categories, 5));
    println!("{}", render_panel("Reports", &dashboard.rows, 5));

    match export_dashboard(&app.config.output_dir, &dashboard) {
        Ok(paths) => {
            for p in paths {
                println!("(Exported {})", p.display());
            }
            println!();
        }
        Err(e) => eprintln!("Write error: {}\n", e),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();

    let config = AppConfig::from_env().context("loading configuration")?;
    tracing::info!(source = %config.source.display(), "Starting outlet report");
    let today = Local::now().date_naive();
    let mut app = App {
        sessions: FileSessionStore::new(config.session_file.clone()),
        config,
        data: None,
        filter: ReportFilter::for_month(today.year(), today.month()),
    };

    loop {
        println!("Outlet Sales Report");
        println!("[1] Load the report file");
        println!("[2] Sign in");
        println!("[3] Set filters");
        println!("[4] Admin dashboard");
        println!("[5] Outlet dashboard");
        println!("[6] Sign out");
        println!("[0] Exit\n");
        match read_choice().as_str() {
            "1" => handle_load(&mut app),
            "2" => handle_sign_in(&mut app),
            "3" => handle_filters(&mut app),
            choice @ ("4" | "5") => {
                let route = if choice == "4" {
                    Route::AdminDashboard
                } else {
                    Route::OutletDashboard
                };
                println!();
                handle_dashboard(&app, route);
                if !prompt_back_to_menu() {
                    break;
                }
            }
            "6" => handle_sign_out(&mut app),
            "0" => break,
            _ => println!("Invalid choice. Please enter 0-6.\n"),
        }
    }
    println!("Exiting the program.");
    Ok(())
}
