#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use immunitrack::{
    catalog::kepi_catalog,
    config::Settings,
    dates,
    eligibility,
    grouping::group_by_age_category,
    io::{self, DueEntry},
    model::{Catalog, Child, VaccineId, VaccineSchedule},
    notification::{generate_reminder_schedule, prepare_reminders, TextReminder},
    stats,
    storage::{JsonStorage, Storage},
};

/// CLI du calendrier vaccinal ImmuniTrack (KEPI)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du catalogue (calendrier KEPI intégré s'il est absent)
    #[arg(long, global = true, default_value = "catalog.json")]
    catalog: String,

    /// Fichier JSON de réglages (délais de rappel, tolérances)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Importer le catalogue depuis un CSV
    ImportCatalog {
        #[arg(long)]
        csv: String,
    },

    /// Écrire le calendrier KEPI intégré dans le fichier catalogue
    InitCatalog,

    /// Afficher le catalogue regroupé par tranche d'âge
    Schedule,

    /// Doses dues à une date donnée
    Due {
        /// Date de naissance (YYYY-MM-DD)
        #[arg(long)]
        birth: String,
        /// Date de référence (défaut : aujourd'hui, UTC)
        #[arg(long)]
        today: Option<String>,
        /// liste "id1,id2,..." des doses déjà administrées
        #[arg(long)]
        administered: Option<String>,
        /// Export CSV (optionnel)
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Doses dont la fenêtre d'âge contient l'âge actuel
    Eligible {
        #[arg(long)]
        birth: String,
        #[arg(long)]
        today: Option<String>,
        #[arg(long)]
        administered: Option<String>,
    },

    /// Doses à venir dans un horizon donné
    Upcoming {
        #[arg(long)]
        birth: String,
        #[arg(long)]
        today: Option<String>,
        #[arg(long)]
        administered: Option<String>,
        #[arg(long, default_value_t = 30)]
        horizon_days: u32,
    },

    /// Dates de rappel avant une échéance
    Reminders {
        /// Échéance (YYYY-MM-DD ou RFC3339)
        #[arg(long)]
        due: String,
        /// Instant de référence (défaut : maintenant)
        #[arg(long)]
        now: Option<String>,
        /// liste "7,3,1" (défaut : réglages)
        #[arg(long)]
        lead_days: Option<String>,
    },

    /// Générer les textes de rappel pour une dose d'un enfant
    Notify {
        #[arg(long)]
        name: String,
        #[arg(long)]
        birth: String,
        #[arg(long)]
        vaccine: String,
        #[arg(long)]
        now: Option<String>,
        /// Fichier de sortie (texte brut)
        #[arg(long)]
        out: String,
    },

    /// Indicateurs
    Stats {
        #[command(subcommand)]
        cmd: StatsCommands,
    },
}

#[derive(Subcommand, Debug)]
enum StatsCommands {
    Coverage {
        #[arg(long)]
        target: u64,
        #[arg(long)]
        immunized: u64,
    },
    Completion {
        #[arg(long)]
        total: u64,
        #[arg(long)]
        administered: u64,
    },
    Dropout {
        #[arg(long)]
        started: u64,
        #[arg(long)]
        completed: u64,
    },
    Wastage {
        #[arg(long)]
        received: u64,
        #[arg(long)]
        administered: u64,
        #[arg(long)]
        wasted: u64,
    },
    /// Ponctualité des doses d'un CSV `vaccine_id,due_date,administered_date`
    Timeliness {
        #[arg(long)]
        doses: String,
        #[arg(long)]
        grace_days: Option<u32>,
    },
    /// Bilan des doses d'un CSV (code 2 si doses en retard ou manquées)
    Summary {
        #[arg(long)]
        doses: String,
        #[arg(long)]
        today: Option<String>,
        #[arg(long)]
        grace_days: Option<u32>,
        #[arg(long)]
        missed_after_days: Option<u32>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        immunitrack::logging::init_with_level("info");
    }

    let mut settings = Settings::load_or_default(cli.config.as_deref())?;
    let storage = JsonStorage::open(&cli.catalog)?;

    let code = match cli.cmd {
        Commands::ImportCatalog { csv } => {
            let imported = io::import_catalog_csv(csv)?;
            storage.save(&imported)?;
            println!("Imported {} vaccine dose(s)", imported.len());
            0
        }
        Commands::InitCatalog => {
            storage.save(&kepi_catalog())?;
            0
        }
        Commands::Schedule => {
            let catalog = load_catalog(&storage)?;
            for (category, vaccines) in group_by_age_category(&catalog.vaccines) {
                let names: Vec<&str> = vaccines.iter().map(|v| v.vaccine_id.as_str()).collect();
                println!("{:<12} {}", category.label(), names.join(", "));
            }
            0
        }
        Commands::Due {
            birth,
            today,
            administered,
            out_csv,
        } => {
            let birth = dates::parse_date(&birth)?;
            let today = parse_today(today.as_deref())?;
            let done = parse_ids(administered.as_deref());
            let catalog = load_catalog(&storage)?;
            let mut entries = Vec::new();
            for v in eligibility::due_vaccines(&catalog, birth, &done, today)? {
                entries.push(DueEntry {
                    vaccine: v,
                    due_date: eligibility::due_date(v, birth)?,
                });
            }
            for e in &entries {
                print_dose(e.vaccine, e.due_date);
            }
            if let Some(path) = out_csv {
                io::export_due_csv(path, &entries)?;
            }
            0
        }
        Commands::Eligible {
            birth,
            today,
            administered,
        } => {
            let birth = dates::parse_date(&birth)?;
            let today = parse_today(today.as_deref())?;
            let done = parse_ids(administered.as_deref());
            let catalog = load_catalog(&storage)?;
            for v in eligibility::age_appropriate_vaccines(&catalog, birth, &done, today) {
                print_dose(v, eligibility::due_date(v, birth)?);
            }
            0
        }
        Commands::Upcoming {
            birth,
            today,
            administered,
            horizon_days,
        } => {
            let birth = dates::parse_date(&birth)?;
            let today = parse_today(today.as_deref())?;
            let done = parse_ids(administered.as_deref());
            let catalog = load_catalog(&storage)?;
            for u in eligibility::upcoming_vaccines(&catalog, birth, &done, today, horizon_days)? {
                print_dose(u.vaccine, u.due_date);
            }
            0
        }
        Commands::Reminders {
            due,
            now,
            lead_days,
        } => {
            let due = parse_instant(&due)?;
            let now = now.as_deref().map(parse_instant).transpose()?.unwrap_or_else(Utc::now);
            if let Some(list) = lead_days {
                settings.reminders.lead_days = parse_lead_days(&list)?;
            }
            for at in generate_reminder_schedule(due, &settings.reminders.lead_days, now) {
                println!("{}", at.to_rfc3339());
            }
            0
        }
        Commands::Notify {
            name,
            birth,
            vaccine,
            now,
            out,
        } => {
            let child = Child::new(name, dates::parse_date(&birth)?);
            let catalog = load_catalog(&storage)?;
            let vaccine = catalog.get(&VaccineId::new(&vaccine))?;
            let now = now.as_deref().map(parse_instant).transpose()?.unwrap_or_else(Utc::now);
            let reminders =
                prepare_reminders(&child, vaccine, &settings.reminders, now, &TextReminder)?;
            if reminders.is_empty() {
                bail!("no reminder left to send for {}", vaccine.vaccine_id);
            }
            let content: Vec<&str> = reminders.iter().map(|r| r.content.as_str()).collect();
            std::fs::write(&out, content.join("---\n"))?;
            for r in &reminders {
                println!(
                    "Reminder for {} ({}) at {}",
                    r.child_name,
                    r.vaccine_id,
                    r.send_at.to_rfc3339()
                );
            }
            0
        }
        Commands::Stats { cmd } => run_stats(cmd, &mut settings)?,
    };

    std::process::exit(code);
}

fn run_stats(cmd: StatsCommands, settings: &mut Settings) -> Result<i32> {
    let code = match cmd {
        StatsCommands::Coverage { target, immunized } => {
            println!("{:.2}", stats::coverage_rate(target, immunized));
            0
        }
        StatsCommands::Completion {
            total,
            administered,
        } => {
            println!("{:.2}", stats::completion_rate(total, administered));
            0
        }
        StatsCommands::Dropout { started, completed } => {
            println!("{:.2}", stats::dropout_rate(started, completed));
            0
        }
        StatsCommands::Wastage {
            received,
            administered,
            wasted,
        } => {
            println!("{:.2}", stats::wastage_rate(received, administered, wasted));
            0
        }
        StatsCommands::Timeliness { doses, grace_days } => {
            let records = io::import_doses_csv(doses)?;
            let grace = grace_days.unwrap_or(settings.stats.grace_days);
            println!("{:.2}", stats::timeliness_rate(&records, grace));
            0
        }
        StatsCommands::Summary {
            doses,
            today,
            grace_days,
            missed_after_days,
        } => {
            let records = io::import_doses_csv(doses)?;
            let today = parse_today(today.as_deref())?;
            if let Some(g) = grace_days {
                settings.stats.grace_days = g;
            }
            if let Some(m) = missed_after_days {
                settings.stats.missed_after_days = m;
            }
            for rec in &records {
                let status = eligibility::classify_dose(rec, today, &settings.stats);
                println!(
                    "{} | {} | {}",
                    rec.vaccine_id.as_ref().map_or("-", |id| id.as_str()),
                    rec.due_date.format("%Y-%m-%d"),
                    status.as_str()
                );
            }
            let summary = stats::summarize_doses(&records, today, &settings.stats);
            println!(
                "total={} administered={} upcoming={} overdue={} missed={} timely={}",
                summary.total,
                summary.administered,
                summary.upcoming,
                summary.overdue,
                summary.missed,
                summary.timely
            );
            println!(
                "completion={:.2} timeliness={:.2}",
                summary.completion_rate(),
                summary.timeliness_rate()
            );
            // Code 2 = WARNING (doses en retard ou manquées)
            if summary.has_gaps() {
                2
            } else {
                0
            }
        }
    };
    Ok(code)
}

fn print_dose(v: &VaccineSchedule, due: NaiveDate) {
    println!(
        "{} | {} | {} | {}",
        v.vaccine_id,
        v.vaccine_name,
        due.format("%Y-%m-%d"),
        dates::describe_age(v.recommended_age_days)
    );
}

fn parse_today(raw: Option<&str>) -> Result<NaiveDate> {
    match raw {
        Some(s) => Ok(dates::parse_date(s)?),
        None => Ok(dates::today_utc()),
    }
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = raw.trim().parse::<DateTime<Utc>>() {
        return Ok(dt);
    }
    Ok(dates::start_of_day_utc(dates::parse_date(raw)?))
}

fn parse_ids(raw: Option<&str>) -> Vec<VaccineId> {
    raw.map(|list| {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(VaccineId::new)
            .collect()
    })
    .unwrap_or_default()
}

fn parse_lead_days(raw: &str) -> Result<Vec<u32>> {
    let days = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<u32>().with_context(|| format!("invalid lead time: {s}")))
        .collect::<Result<Vec<_>>>()?;
    if days.is_empty() {
        bail!("at least one lead time is required");
    }
    Ok(days)
}

fn load_catalog(storage: &JsonStorage) -> Result<Catalog> {
    if storage.path().exists() {
        return storage.load();
    }
    #[cfg(feature = "logging")]
    tracing::info!(
        path = %storage.path().display(),
        "catalog not found, using built-in KEPI schedule"
    );
    Ok(kepi_catalog())
}
