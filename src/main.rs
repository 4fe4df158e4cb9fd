use chrono::{Local, NaiveDateTime};
use clap::Parser;
use coffee_filter::core::display::{ensure_https, status_label, weekly_listing, ShopSummary};
use coffee_filter::core::hours::{is_open_at, today_hours_at};
use coffee_filter::core::markers::markers_for;
use coffee_filter::core::{ConfigProvider, Geocoder};
use coffee_filter::domain::model::{CoffeeShop, Coordinates};
use coffee_filter::utils::logger;
use coffee_filter::utils::validation::Validate;
use coffee_filter::{
    CliConfig, CoffeeFilterClient, CoffeeFilterError, CoffeeShopUpdate, Command, FileTokenStore,
    NewCoffeeShop, NominatimGeocoder, PhotonAutocomplete, Result, Settings, WeeklySchedule,
};
use serde::Serialize;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let settings = match Settings::resolve(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            fail(&e);
        }
    };

    if let Err(e) = run(&cli, &settings).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        fail(&e);
    }

    Ok(())
}

fn fail(e: &CoffeeFilterError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code().max(1));
}

fn emit<T: Serialize>(json: bool, value: &T, human: impl FnOnce(&T)) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human(value);
    }
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn parse_at(text: &str) -> Result<NaiveDateTime> {
    ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .ok_or_else(|| CoffeeFilterError::ValidationError {
            field: "at".to_string(),
            message: format!("'{}' is not a date and time like 2024-01-01T14:30", text),
        })
}

fn print_summaries(summaries: &Vec<ShopSummary>) {
    if summaries.is_empty() {
        println!("No coffee shops found");
    }
    for s in summaries {
        let star = if s.starred { "★" } else { " " };
        let status = if s.is_open { "Open" } else { "Closed" };
        println!("{} {:>4}  {:<32} {:<6}  {}", star, s.id, s.name, status, s.today);
    }
}

fn print_shop(shop: &CoffeeShop, closed_label: &str) {
    let now = Local::now();
    println!("{}{}", shop.name, if shop.starred { "  ★ Featured" } else { "" });
    println!("  {}", shop.address);
    println!(
        "  {} · {}",
        status_label(&shop.weekly_hours, &now),
        today_hours_at(&shop.weekly_hours, &now, closed_label)
    );
    if !shop.description.is_empty() {
        println!("  {}", shop.description);
    }
    if !shop.machine.is_empty() {
        println!("  Machine: {}", shop.machine);
    }

    let amenities: Vec<&str> = [
        (shop.has_wifi, "Wi-Fi"),
        (shop.accessibility, "Accessible"),
        (shop.pour_over, "Pour over"),
    ]
    .into_iter()
    .filter_map(|(present, label)| present.then_some(label))
    .collect();
    if !amenities.is_empty() {
        println!("  {}", amenities.join(", "));
    }

    println!("  Hours:");
    for row in weekly_listing(&shop.weekly_hours, &now) {
        let marker = if row.is_today { "›" } else { " " };
        println!("   {} {}  {}", marker, row.label, row.hours);
    }

    if let Some(website) = &shop.website {
        println!("  Website: {}", ensure_https(website));
    }
    if let Some(instagram) = &shop.instagram {
        println!("  Instagram: {}", instagram);
    }
}

async fn run(cli: &CliConfig, settings: &Settings) -> Result<()> {
    let tokens = FileTokenStore::new(settings.token_dir().to_string());
    let client = CoffeeFilterClient::from_config(settings, tokens)?;
    let closed_label = settings.closed_label();

    match &cli.command {
        Command::List { open_now } => {
            let now = Local::now();
            let summaries: Vec<ShopSummary> = client
                .list_shops()
                .await?
                .iter()
                .map(|shop| ShopSummary::new(shop, &now, closed_label))
                .filter(|summary| !open_now || summary.is_open)
                .collect();
            emit(cli.json, &summaries, print_summaries)?;
        }
        Command::Show { id } => {
            let shop = client.get_shop(*id).await?;
            emit(cli.json, &shop, |shop| print_shop(shop, closed_label))?;
        }
        Command::Nearby { lat, lon, radius } => {
            let center = Coordinates {
                latitude: *lat,
                longitude: *lon,
            };
            let now = Local::now();
            let summaries: Vec<ShopSummary> = client
                .search_by_location(center, *radius)
                .await?
                .iter()
                .map(|shop| ShopSummary::new(shop, &now, closed_label))
                .collect();
            emit(cli.json, &summaries, print_summaries)?;
        }
        Command::Markers => {
            let shops = client.list_shops().await?;
            let markers = markers_for(&shops, &Local::now());
            emit(cli.json, &markers, |markers| {
                for m in markers {
                    println!(
                        "{:>4}  {:>10.5} {:>11.5}  {:?}{}",
                        m.id,
                        m.latitude,
                        m.longitude,
                        m.display_state,
                        if m.starred { " ★" } else { "" }
                    );
                }
            })?;
        }
        Command::Login { username, password } => {
            let outcome = client.login(username, password).await?;
            tracing::info!("Logged in as {}", username);
            println!(
                "✅ Logged in as {}{}",
                username,
                if outcome.is_admin { " (admin)" } else { "" }
            );
        }
        Command::Logout => {
            client.logout().await?;
            println!("Logged out");
        }
        Command::Whoami => {
            let user = client.current_user().await?;
            emit(cli.json, &user, |user| {
                println!("{}{}", user.username, if user.is_admin { " (admin)" } else { "" })
            })?;
        }
        Command::Create { file, geocode } => {
            let mut shop: NewCoffeeShop = read_json(file)?;
            shop.validate()?;

            if *geocode && (shop.latitude.is_none() || shop.longitude.is_none()) {
                let geocoder = NominatimGeocoder::new(settings.nominatim_url.as_str());
                let found = geocoder.geocode(&shop.address).await?;
                match found {
                    Some(coordinates) => shop = shop.with_coordinates(coordinates),
                    None => tracing::warn!(
                        "No coordinates found for '{}', leaving it to the backend",
                        shop.address
                    ),
                }
            }

            let created = client.create_shop(&shop).await?;
            emit(cli.json, &created, |shop| {
                println!("✅ Created coffee shop {} ({})", shop.id, shop.name)
            })?;
        }
        Command::Update { id, file } => {
            let update: CoffeeShopUpdate = read_json(file)?;
            update.validate()?;
            let updated = client.update_shop(*id, &update).await?;
            emit(cli.json, &updated, |shop| {
                println!("✅ Updated coffee shop {} ({})", shop.id, shop.name)
            })?;
        }
        Command::Delete { id } => {
            client.delete_shop(*id).await?;
            println!("🗑  Deleted coffee shop {}", id);
        }
        Command::Geocode { address } => {
            let geocoder = NominatimGeocoder::new(settings.nominatim_url.as_str());
            let coordinates = geocoder.geocode(address).await?;
            emit(cli.json, &coordinates, |coordinates| match coordinates {
                Some(c) => println!("{}, {}", c.latitude, c.longitude),
                None => println!("No match for '{}'", address),
            })?;
        }
        Command::Suggest { query } => {
            let autocomplete = PhotonAutocomplete::new(settings.photon_url.as_str());
            let candidates = autocomplete.suggest(query).await?;
            emit(cli.json, &candidates, |candidates| {
                for c in candidates {
                    println!(
                        "{}  ({}, {})",
                        c.label, c.coordinates.latitude, c.coordinates.longitude
                    );
                }
            })?;
        }
        Command::Hours { file, at } => {
            let schedule: WeeklySchedule = read_json(file)?;
            let now = match at {
                Some(text) => parse_at(text)?,
                None => Local::now().naive_local(),
            };

            let is_open = is_open_at(&schedule, &now);
            let today = today_hours_at(&schedule, &now, closed_label);
            let rows = weekly_listing(&schedule, &now);

            #[derive(Serialize)]
            struct HoursReport<'a> {
                at: NaiveDateTime,
                is_open: bool,
                today: &'a str,
                week: &'a [coffee_filter::core::display::DayRow],
            }

            let report = HoursReport {
                at: now,
                is_open,
                today: &today,
                week: &rows,
            };
            emit(cli.json, &report, |report| {
                println!(
                    "{} · {}",
                    if report.is_open { "Open" } else { "Closed" },
                    report.today
                );
                for row in report.week {
                    let marker = if row.is_today { "›" } else { " " };
                    println!(" {} {}  {}", marker, row.label, row.hours);
                }
            })?;
        }
    }

    Ok(())
}
