use std::{error::Error, fs, io, path::PathBuf};

use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use engine::{
    Engine, JsonDirStore, MemoryStore, MessFeeConfig, MonthKey, NewResident, PaymentKind,
    PaymentStatus, RecordPayment, RoomStatus, UpdateRoom,
};
use uuid::Uuid;

mod settings;

type CliResult = Result<(), Box<dyn Error + Send + Sync>>;

#[derive(Parser, Debug)]
#[command(name = "locanda")]
#[command(about = "Manage residents, rooms and payments for a small lodging house")]
struct Cli {
    /// Data directory for the JSON snapshots (overrides settings.toml).
    #[arg(long, env = "LOCANDA_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Keep everything in memory; nothing is written to disk.
    #[arg(long)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Resident(Resident),
    Payment(Payment),
    Room(Room),
    Mess(Mess),
    Report(Report),
}

#[derive(Args, Debug)]
struct Resident {
    #[command(subcommand)]
    command: ResidentCommand,
}

#[derive(Subcommand, Debug)]
enum ResidentCommand {
    /// Onboard a new resident into a room.
    Add(ResidentAddArgs),
    /// List residents (active only unless --all).
    List {
        #[arg(long)]
        all: bool,
    },
    /// Move a resident to another room.
    Move {
        #[arg(long)]
        id: Uuid,
        #[arg(long)]
        room: String,
    },
    /// Deactivate a resident, freeing their bed.
    Remove {
        #[arg(long)]
        id: Uuid,
    },
}

#[derive(Args, Debug)]
struct ResidentAddArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    contact: String,
    #[arg(long)]
    address: String,
    #[arg(long)]
    room: String,
    /// Monthly rent in minor currency units.
    #[arg(long)]
    rent: i64,
    /// Day of month the rent falls due (1-31).
    #[arg(long, default_value_t = 1)]
    due_day: u8,
    /// Security deposit in minor units; a paid deposit payment is recorded
    /// automatically when positive.
    #[arg(long, default_value_t = 0)]
    deposit: i64,
    /// Joining date (YYYY-MM-DD), defaults to today.
    #[arg(long)]
    joined: Option<NaiveDate>,
    /// Expected leaving date (YYYY-MM-DD).
    #[arg(long)]
    leaving: Option<NaiveDate>,
    /// Subscribe the resident to the mess.
    #[arg(long)]
    mess: bool,
}

#[derive(Args, Debug)]
struct Payment {
    #[command(subcommand)]
    command: PaymentCommand,
}

#[derive(Subcommand, Debug)]
enum PaymentCommand {
    /// Record a payment against a resident's ledger.
    Record(PaymentRecordArgs),
    /// Change a payment's status.
    Mark {
        #[arg(long)]
        id: Uuid,
        /// paid, pending or overdue.
        #[arg(long)]
        status: String,
    },
    /// List payments, optionally filtered.
    List {
        #[arg(long)]
        resident: Option<Uuid>,
        /// Only outstanding (pending/overdue) payments.
        #[arg(long)]
        pending: bool,
    },
}

#[derive(Args, Debug)]
struct PaymentRecordArgs {
    #[arg(long)]
    resident: Uuid,
    /// Amount in minor units. Defaults to the configured mess rate for
    /// --kind mess.
    #[arg(long)]
    amount: Option<i64>,
    /// rent, mess, security or other.
    #[arg(long, default_value = "rent")]
    kind: String,
    /// Target month (YYYY-MM), defaults to the current month.
    #[arg(long)]
    month: Option<String>,
    /// paid, pending or overdue.
    #[arg(long, default_value = "paid")]
    status: String,
    /// Payment date (YYYY-MM-DD), defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,
    #[arg(long)]
    note: Option<String>,
}

#[derive(Args, Debug)]
struct Room {
    #[command(subcommand)]
    command: RoomCommand,
}

#[derive(Subcommand, Debug)]
enum RoomCommand {
    /// Register a new room.
    Add {
        #[arg(long)]
        number: String,
        #[arg(long)]
        capacity: u32,
    },
    /// Change a room's capacity and/or status.
    Set {
        #[arg(long)]
        number: String,
        #[arg(long)]
        capacity: Option<u32>,
        /// vacant, occupied or maintenance.
        #[arg(long)]
        status: Option<String>,
    },
    /// List rooms with their occupancy.
    List,
}

#[derive(Args, Debug)]
struct Mess {
    #[command(subcommand)]
    command: MessCommand,
}

#[derive(Subcommand, Debug)]
enum MessCommand {
    /// Update the monthly mess fee configuration.
    Set {
        /// Monthly rate in minor units.
        #[arg(long)]
        rate: i64,
        #[arg(long)]
        active: bool,
    },
}

#[derive(Args, Debug)]
struct Report {
    #[command(subcommand)]
    command: ReportCommand,
}

#[derive(Subcommand, Debug)]
enum ReportCommand {
    /// Headline revenue and occupancy figures.
    Summary,
    /// Paid totals per payment kind and status counts since a date.
    Breakdown {
        #[arg(long)]
        since: NaiveDate,
    },
    /// Trailing per-month revenue series.
    Monthly {
        #[arg(long, default_value_t = 6)]
        months: u32,
    },
    /// Export payments as CSV, to stdout or a file.
    Export {
        /// Only payments dated on or after this date.
        #[arg(long)]
        since: Option<NaiveDate>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> CliResult {
    let settings = settings::Settings::new()?;
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "locanda={level},engine={level}",
            level = settings.level
        ))
        .init();

    let mut engine = if cli.ephemeral {
        Engine::builder().store(MemoryStore::default()).build()?
    } else {
        let dir = cli
            .data_dir
            .unwrap_or_else(|| PathBuf::from(&settings.data_dir));
        Engine::builder().store(JsonDirStore::new(dir)?).build()?
    };

    match cli.command {
        Command::Resident(Resident { command }) => resident_command(&mut engine, command)?,
        Command::Payment(Payment { command }) => payment_command(&mut engine, command)?,
        Command::Room(Room { command }) => room_command(&mut engine, command)?,
        Command::Mess(Mess {
            command: MessCommand::Set { rate, active },
        }) => {
            engine.update_mess_fee(MessFeeConfig {
                monthly_rate_minor: rate,
                active,
            })?;
            println!("mess fee set to {rate} (active: {active})");
        }
        Command::Report(Report { command }) => report_command(&engine, command)?,
    }

    let dirty = engine.unsaved();
    if !dirty.is_empty() {
        tracing::warn!(?dirty, "some collections were not persisted");
        eprintln!("warning: unsaved changes in: {dirty:?}");
    }

    Ok(())
}

fn resident_command(engine: &mut Engine, command: ResidentCommand) -> CliResult {
    match command {
        ResidentCommand::Add(args) => {
            let joined = args.joined.unwrap_or_else(|| Utc::now().date_naive());
            let mut cmd = NewResident::new(args.name, args.room, args.rent, args.due_day, joined)
                .contact_number(args.contact)
                .home_address(args.address)
                .security_deposit(args.deposit)
                .mess_subscribed(args.mess);
            if let Some(leaving) = args.leaving {
                cmd = cmd.leaving_on(leaving);
            }
            let id = engine.add_resident(cmd)?;
            println!("onboarded resident {id}");
        }
        ResidentCommand::List { all } => {
            for resident in engine.residents() {
                if !all && !resident.is_active() {
                    continue;
                }
                println!(
                    "{}  {}  room {}  rent {}  due day {}  {}",
                    resident.id,
                    resident.name,
                    resident.room_number,
                    resident.rent_minor,
                    resident.due_day,
                    resident.status.as_str(),
                );
            }
        }
        ResidentCommand::Move { id, room } => {
            let mut resident = engine.resident(id)?.clone();
            resident.room_number = room.clone();
            engine.update_resident(resident)?;
            println!("moved resident {id} to room {room}");
        }
        ResidentCommand::Remove { id } => {
            engine.remove_resident(id)?;
            println!("deactivated resident {id}");
        }
    }
    Ok(())
}

fn payment_command(engine: &mut Engine, command: PaymentCommand) -> CliResult {
    match command {
        PaymentCommand::Record(args) => {
            let kind = PaymentKind::try_from(args.kind.as_str())?;
            let status = PaymentStatus::try_from(args.status.as_str())?;
            let month = match args.month {
                Some(raw) => raw.parse::<MonthKey>()?,
                None => MonthKey::current(),
            };
            let amount = match (args.amount, kind) {
                (Some(amount), _) => amount,
                (None, PaymentKind::Mess) => {
                    let fee = engine.mess_fee();
                    if !fee.active {
                        return Err("mess fee is inactive; pass --amount explicitly".into());
                    }
                    fee.monthly_rate_minor
                }
                (None, _) => return Err("--amount is required for this payment kind".into()),
            };

            let mut cmd = RecordPayment::new(args.resident, amount, kind, month).status(status);
            if let Some(date) = args.date {
                cmd = cmd.paid_on(date);
            }
            if let Some(note) = args.note {
                cmd = cmd.note(note);
            }
            let id = engine.record_payment(cmd)?;
            println!("recorded payment {id}");
        }
        PaymentCommand::Mark { id, status } => {
            let status = PaymentStatus::try_from(status.as_str())?;
            engine.set_payment_status(id, status)?;
            println!("payment {id} marked {}", status.as_str());
        }
        PaymentCommand::List { resident, pending } => {
            let payments: Vec<_> = match resident {
                Some(id) => engine.payments_for(id),
                None if pending => engine.pending_payments(),
                None => engine.payments().iter().collect(),
            };
            for payment in payments {
                if pending && !payment.status.is_outstanding() {
                    continue;
                }
                println!(
                    "{}  {}  {}  {}  {}  {}",
                    payment.id,
                    payment.paid_on,
                    payment.amount_minor,
                    payment.kind.as_str(),
                    payment.month,
                    payment.status.as_str(),
                );
            }
        }
    }
    Ok(())
}

fn room_command(engine: &mut Engine, command: RoomCommand) -> CliResult {
    match command {
        RoomCommand::Add { number, capacity } => {
            engine.add_room(&number, capacity)?;
            println!("added room {number} ({capacity} beds)");
        }
        RoomCommand::Set {
            number,
            capacity,
            status,
        } => {
            let mut cmd = UpdateRoom::new(&number);
            if let Some(capacity) = capacity {
                cmd = cmd.capacity(capacity);
            }
            if let Some(raw) = status {
                cmd = cmd.status(RoomStatus::try_from(raw.as_str())?);
            }
            engine.update_room(cmd)?;
            println!("updated room {number}");
        }
        RoomCommand::List => {
            for room in engine.rooms() {
                println!(
                    "{}  {}/{} beds  {}",
                    room.number,
                    room.occupants().len(),
                    room.capacity,
                    room.status().as_str(),
                );
            }
        }
    }
    Ok(())
}

fn report_command(engine: &Engine, command: ReportCommand) -> CliResult {
    match command {
        ReportCommand::Summary => {
            let pending = engine.pending_payments();
            let revenue = api_types::stats::RevenueSummary {
                total_minor: engine.total_revenue(),
                current_month_minor: engine.current_month_revenue(),
                pending_count: pending
                    .iter()
                    .filter(|p| p.status == PaymentStatus::Pending)
                    .count(),
                overdue_count: pending
                    .iter()
                    .filter(|p| p.status == PaymentStatus::Overdue)
                    .count(),
            };
            let beds = engine.occupancy_summary();
            let occupancy = api_types::stats::OccupancySummary {
                capacity: beds.capacity,
                occupied: beds.occupied,
                rate_percent: beds.rate_percent,
            };

            println!("total revenue:          {}", revenue.total_minor);
            println!("current month revenue:  {}", revenue.current_month_minor);
            println!("pending payments:       {}", revenue.pending_count);
            println!("overdue payments:       {}", revenue.overdue_count);
            println!(
                "occupancy:              {}/{} beds ({:.1}%)",
                occupancy.occupied, occupancy.capacity, occupancy.rate_percent
            );
        }
        ReportCommand::Breakdown { since } => {
            let by_kind = engine.revenue_by_kind(since);
            let counts = engine.payment_status_counts(since);
            println!("since {since}:");
            println!("  rent:     {}", by_kind.rent_minor);
            println!("  mess:     {}", by_kind.mess_minor);
            println!("  security: {}", by_kind.security_minor);
            println!("  other:    {}", by_kind.other_minor);
            println!(
                "  statuses: {} paid / {} pending / {} overdue",
                counts.paid, counts.pending, counts.overdue
            );
        }
        ReportCommand::Monthly { months } => {
            for point in engine.monthly_revenue(months) {
                println!("{}  {}", point.month, point.revenue_minor);
            }
        }
        ReportCommand::Export { since, out } => match out {
            Some(path) => {
                let file = fs::File::create(path)?;
                export_csv(engine, since, file)?;
            }
            None => export_csv(engine, since, io::stdout())?,
        },
    }
    Ok(())
}

fn export_csv(engine: &Engine, since: Option<NaiveDate>, out: impl io::Write) -> CliResult {
    let mut writer = csv::Writer::from_writer(out);
    for payment in engine.payments() {
        if let Some(since) = since
            && payment.paid_on < since
        {
            continue;
        }
        // Historical payments may outlive their resident record; export them
        // with a placeholder instead of failing.
        let resident = engine
            .resident(payment.resident_id)
            .map(|r| r.name.clone())
            .unwrap_or_else(|_| "(unknown)".to_string());
        writer.serialize(api_types::payment::ExportRow {
            date: payment.paid_on,
            resident,
            amount: payment.amount_minor,
            kind: payment.kind.as_str().to_string(),
            status: payment.status.as_str().to_string(),
            month: payment.month.to_string(),
            notes: payment.note.clone().unwrap_or_default(),
        })?;
    }
    writer.flush()?;
    Ok(())
}
