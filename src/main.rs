use booking_calendar::core::bootstrap::PageCalendars;
use booking_calendar::domain::ports::{AvailabilitySource, DatePicker};
use booking_calendar::utils::logger::{self, LogFormat};
use booking_calendar::{CliConfig, MemoryBackend, MemoryPicker, StaticPage};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let log_format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(cli.verbose, log_format);

    tracing::info!("Starting booking-calendar");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let mut page = match StaticPage::from_file(&cli.page) {
        Ok(page) => page,
        Err(e) => {
            eprintln!("❌ Failed to load page description '{}': {}", cli.page.display(), e);
            std::process::exit(1);
        }
    };

    let today = cli.today();
    let backend = MemoryBackend::new(today);
    let source = if cli.offline {
        None
    } else {
        Some(config.availability_source()?)
    };

    let calendars = config
        .bootstrap(today)
        .initialize(
            &mut page,
            Some(&backend),
            source.as_ref().map(|s| s as &dyn AvailabilitySource),
        )
        .await;

    let calendars = match apply_selections(calendars, &cli) {
        Ok(calendars) => calendars,
        Err(e) => {
            tracing::error!("Selection rejected: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    print_summary(&calendars, &page);
    Ok(())
}

const MAX_LISTED_DATES: usize = 10;

fn apply_selections(
    mut calendars: PageCalendars<MemoryPicker>,
    cli: &CliConfig,
) -> booking_calendar::Result<PageCalendars<MemoryPicker>> {
    if cli.start.is_none() && cli.end.is_none() {
        return Ok(calendars);
    }

    if let Some(range) = calendars.range.as_mut() {
        if let Some(start) = cli.start {
            range.select_start(start)?;
            tracing::info!("Selected start {}", start);
        }
        if let Some(end) = cli.end {
            range.select_end(end)?;
            tracing::info!("Selected end {}", end);
        }
    } else {
        tracing::warn!("Page has no date range fields, ignoring --start/--end");
    }

    Ok(calendars)
}

fn print_summary(calendars: &PageCalendars<MemoryPicker>, page: &StaticPage) {
    for picker in &calendars.plain {
        println!("📅 {}: plain date input", picker.field());
    }

    match &calendars.range {
        Some(range) => {
            let source = if calendars.disabled_dates_loaded {
                "from availability API"
            } else {
                "none loaded"
            };
            println!(
                "🚫 Disabled dates: {} ({})",
                range.disabled_dates().len(),
                source
            );
            let listed: Vec<String> = range
                .disabled_dates()
                .iter()
                .take(MAX_LISTED_DATES)
                .map(|d| d.to_string())
                .collect();
            if !listed.is_empty() {
                let more = range.disabled_dates().len().saturating_sub(listed.len());
                if more > 0 {
                    println!("   {} (+{} more)", listed.join(", "), more);
                } else {
                    println!("   {}", listed.join(", "));
                }
            }
            print_picker("Start", range.start());
            print_picker("End", range.end());

            let selection = range.selection();
            if selection.is_complete() {
                match selection.validate() {
                    Ok(()) => {
                        if let Some(nights) = selection.nights() {
                            println!("🛏  {} night(s)", nights);
                        }
                    }
                    Err(e) => println!("⚠️  {}", e.user_friendly_message()),
                }
            }
        }
        None => println!("ℹ️  No date range on this page"),
    }

    if let Some(field) = page.focused() {
        println!("🔍 Focused: {}", field);
    }
}

fn print_picker(label: &str, picker: &MemoryPicker) {
    let min = picker
        .min_date()
        .map(|d| d.to_string())
        .unwrap_or_else(|| "-".to_string());
    let value = if picker.selected().is_some() {
        format!("{} ({})", picker.display_value(), picker.value())
    } else {
        "not selected".to_string()
    };
    println!("{} [{}] min {}: {}", label, picker.field(), min, value);
}
