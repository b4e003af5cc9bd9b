use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use smartcare::application::auth::Authenticator;
use smartcare::application::catalog::ServiceCatalog;
use smartcare::application::chat::ChatService;
use smartcare::application::ledger::BalanceLedger;
use smartcare::application::settlement::SettlementCoordinator;
use smartcare::application::topup::TopUpSubmitter;
use smartcare::config::Config;
use smartcare::domain::session::Session;
use smartcare::domain::topup::TopUpMethod;
use smartcare::error::SmartCareError;
use smartcare::infrastructure::local_cache::LocalCache;
use smartcare::infrastructure::rest::RestStore;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(author, version, about = "SmartCare service-marketplace client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log in and keep the session locally
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Drop the local session
    Logout,
    /// Show the current balance and top-up history
    Balance,
    /// Submit a top-up request (methods: transfer_bank, e_wallet, virtual_account, qris)
    TopUp { amount: u64, method: TopUpMethod },
    /// Browse the service catalog
    Services,
    /// Order a service; this creates a pending bill
    Order { service_id: Uuid },
    /// List bills and their status
    Bills,
    /// Pay a pending bill from the balance
    Pay { bill_id: Uuid },
    /// Order history with service names
    Orders,
    /// Send a chat message to the admin
    ChatSend {
        #[arg(long)]
        to: Uuid,
        message: String,
    },
    /// Reload the conversation
    ChatHistory,
    /// Update the profile name and optionally the password
    Profile {
        #[arg(long)]
        name: String,
        #[arg(long)]
        password: Option<String>,
    },
}

fn require_session(cache: &LocalCache) -> smartcare::error::Result<Session> {
    cache.load_session()?.ok_or(SmartCareError::NoSession)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().into_diagnostic()?;
    let store = RestStore::new(&config);
    let cache = LocalCache::new(config.data_dir.clone());

    match cli.command {
        Command::Register {
            name,
            email,
            password,
        } => {
            let auth = Authenticator::new(Box::new(store.clone()));
            let account = auth
                .register(&name, &email, &password)
                .await
                .into_diagnostic()?;
            println!("registered {} <{}>", account.name, account.email);
        }
        Command::Login { email, password } => {
            let auth = Authenticator::new(Box::new(store.clone()));
            let session = auth.login(&email, &password).await.into_diagnostic()?;
            cache.store_session(&session).into_diagnostic()?;
            println!("welcome, {}", session.name);
        }
        Command::Logout => {
            cache.clear_session().into_diagnostic()?;
            println!("logged out");
        }
        Command::Balance => {
            let session = require_session(&cache).into_diagnostic()?;
            let ledger = BalanceLedger::new(Box::new(store.clone()));
            match ledger.balance(session.account_id).await {
                Ok(balance) => {
                    cache
                        .remember_balance(&session.email, &session.name, balance)
                        .into_diagnostic()?;
                    println!("balance: Rp {}", balance.value());
                }
                Err(err @ SmartCareError::Transport(_)) => {
                    warn!(%err, "balance fetch failed, falling back to cache");
                    let cached = cache.cached_balance(&session.email).into_diagnostic()?;
                    match cached {
                        Some(balance) => println!("balance: Rp {} (cached)", balance.value()),
                        None => return Err(err).into_diagnostic(),
                    }
                    // Backend unreachable, so skip the history listing.
                    return Ok(());
                }
                Err(err) => return Err(err).into_diagnostic(),
            }

            let submitter = TopUpSubmitter::new(Box::new(store.clone()));
            let history = submitter.history(&session).await.into_diagnostic()?;
            for request in history {
                println!(
                    "{}  Rp {:>9}  {:15}  {}",
                    request.created_at.format("%Y-%m-%d"),
                    request.amount.value(),
                    request.method.to_string(),
                    request.status
                );
            }
        }
        Command::TopUp { amount, method } => {
            let session = require_session(&cache).into_diagnostic()?;
            let submitter = TopUpSubmitter::new(Box::new(store.clone()));
            let request = submitter
                .submit(&session, amount, method)
                .await
                .into_diagnostic()?;
            println!(
                "top-up of Rp {} via {} submitted, awaiting operator approval",
                request.amount.value(),
                request.method
            );
        }
        Command::Services => {
            let catalog = ServiceCatalog::new(Box::new(store.clone()), Box::new(store.clone()));
            for service in catalog.list().await.into_diagnostic()? {
                println!(
                    "{}  Rp {:>9}  {}: {}",
                    service.id,
                    service.base_price.value(),
                    service.name,
                    service.description
                );
            }
        }
        Command::Order { service_id } => {
            let session = require_session(&cache).into_diagnostic()?;
            let catalog = ServiceCatalog::new(Box::new(store.clone()), Box::new(store.clone()));
            let bill = catalog.order(&session, service_id).await.into_diagnostic()?;
            println!(
                "ordered; bill {} for Rp {} is pending",
                bill.id,
                bill.amount.value()
            );
        }
        Command::Bills => {
            let session = require_session(&cache).into_diagnostic()?;
            let catalog = ServiceCatalog::new(Box::new(store.clone()), Box::new(store.clone()));
            for summary in catalog.order_history(&session).await.into_diagnostic()? {
                let bill = &summary.bill;
                let via = bill
                    .payment_method
                    .map(|method| format!(" via {method}"))
                    .unwrap_or_default();
                println!(
                    "{}  {}  Rp {:>9}  {}{}",
                    bill.id,
                    bill.ordered_at.format("%Y-%m-%d"),
                    bill.amount.value(),
                    bill.status,
                    via
                );
            }
        }
        Command::Pay { bill_id } => {
            let session = require_session(&cache).into_diagnostic()?;
            let coordinator = SettlementCoordinator::new(
                BalanceLedger::new(Box::new(store.clone())),
                Box::new(store.clone()),
            );
            let bill = coordinator
                .pay_bill(&session, bill_id)
                .await
                .into_diagnostic()?;
            println!("paid Rp {} from balance", bill.amount.value());
        }
        Command::Orders => {
            let session = require_session(&cache).into_diagnostic()?;
            let catalog = ServiceCatalog::new(Box::new(store.clone()), Box::new(store.clone()));
            for summary in catalog.order_history(&session).await.into_diagnostic()? {
                let name = summary.service_name.as_deref().unwrap_or("(service not found)");
                println!(
                    "{}  {:25}  Rp {:>9}  {}",
                    summary.bill.ordered_at.format("%Y-%m-%d"),
                    name,
                    summary.bill.amount.value(),
                    summary.bill.status
                );
            }
        }
        Command::ChatSend { to, message } => {
            let session = require_session(&cache).into_diagnostic()?;
            let chat = ChatService::new(Box::new(store.clone()));
            chat.send(&session, to, &message).await.into_diagnostic()?;
            println!("sent");
        }
        Command::ChatHistory => {
            let session = require_session(&cache).into_diagnostic()?;
            let chat = ChatService::new(Box::new(store.clone()));
            for message in chat.history(&session).await.into_diagnostic()? {
                let who = if message.sender_id == session.account_id {
                    "you"
                } else {
                    "admin"
                };
                println!(
                    "[{}] {}: {}",
                    message.created_at.format("%H:%M"),
                    who,
                    message.body
                );
            }
        }
        Command::Profile { name, password } => {
            let session = require_session(&cache).into_diagnostic()?;
            let auth = Authenticator::new(Box::new(store.clone()));
            let updated = auth
                .update_profile(&session, &name, password.as_deref())
                .await
                .into_diagnostic()?;
            cache.store_session(&updated).into_diagnostic()?;
            println!("profile updated");
        }
    }

    Ok(())
}
