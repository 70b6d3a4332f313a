use clap::{Args, Parser, Subcommand};
use labtrack_ui::{DraftField, HttpTestsApi, TestListView, TestsApi};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "labtrack")]
#[command(about = "Patient diagnostic-test tracker CLI")]
struct Cli {
    /// Base URL of the labtrack REST server
    #[arg(
        long,
        global = true,
        env = "LABTRACK_SERVER_URL",
        default_value = "http://localhost:3000"
    )]
    server: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all test results
    List,
    /// Add a test result
    Add {
        #[arg(long)]
        patient_name: String,
        #[arg(long)]
        test_type: String,
        #[arg(long)]
        result: String,
        /// Test date (RFC 3339 or YYYY-MM-DD); defaults to now
        #[arg(long)]
        test_date: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Edit a test result; fields not given keep their current value
    Edit {
        /// Test ID
        id: String,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete a test result
    Delete {
        /// Test ID
        id: String,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args)]
struct FieldArgs {
    #[arg(long)]
    patient_name: Option<String>,
    #[arg(long)]
    test_type: Option<String>,
    #[arg(long)]
    result: Option<String>,
    /// Test date (RFC 3339 or YYYY-MM-DD)
    #[arg(long)]
    test_date: Option<String>,
    #[arg(long)]
    notes: Option<String>,
}

impl FieldArgs {
    fn into_inputs(self) -> Vec<(DraftField, String)> {
        [
            (DraftField::PatientName, self.patient_name),
            (DraftField::TestType, self.test_type),
            (DraftField::Result, self.result),
            (DraftField::TestDate, self.test_date),
            (DraftField::Notes, self.notes),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("labtrack_ui=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("Use 'labtrack --help' for commands");
        return Ok(());
    };

    let mut view = TestListView::new(HttpTestsApi::new(cli.server)?);
    view.mount().await?;

    match command {
        Commands::List => {}
        Commands::Add {
            patient_name,
            test_type,
            result,
            test_date,
            notes,
        } => {
            view.open_add();
            view.input(DraftField::PatientName, patient_name);
            view.input(DraftField::TestType, test_type);
            view.input(DraftField::Result, result);
            view.input(DraftField::TestDate, test_date.unwrap_or_default());
            view.input(DraftField::Notes, notes.unwrap_or_default());
            view.submit_create().await?;
        }
        Commands::Edit { id, fields } => {
            open_or_bail(&mut view, &id, TestListView::open_edit)?;
            for (field, value) in fields.into_inputs() {
                view.input(field, value);
            }
            view.submit_edit().await?;
        }
        Commands::Delete { id, yes } => {
            open_or_bail(&mut view, &id, TestListView::open_delete)?;
            if !yes {
                print!("{}", view.render());
                println!("\nRe-run with --yes to delete.");
                return Ok(());
            }
            view.confirm_delete().await?;
        }
    }

    print!("{}", view.render());
    Ok(())
}

fn open_or_bail<A: TestsApi>(
    view: &mut TestListView<A>,
    id: &str,
    open: fn(&mut TestListView<A>, &str) -> bool,
) -> anyhow::Result<()> {
    if !open(view, id) {
        anyhow::bail!("No test result with ID {}", id);
    }
    Ok(())
}
