//! Command-line driver wiring the portal core to a live data service.
//!
//! Configuration comes from `PORTAL_`-prefixed environment variables or a
//! configuration file; subcommands map one-to-one onto the workflow
//! operations. Exit status is non-zero when an operation fails.

use std::error::Error;
use std::ffi::OsString;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use portal::PortalSettings;
use portal::domain::{
    AdminAuthService, CatalogueService, MemberAuthFlow, MemberAuthService, RegistrationFlow,
    RegistrationService, SessionStore,
};
use portal::outbound::rest::{
    RestAdminDirectory, RestCategoryCatalogue, RestClientDirectory, RestDataService,
    RestMemberVerification, RestRegistrationRepository,
};
use portal::outbound::storage::FileSessionStorage;

#[derive(Debug, Parser)]
#[command(name = "portal", about = "Member and employment portal client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show which identities are currently held.
    Status,
    /// Log in as an administrator.
    AdminLogin {
        /// Admin username.
        username: String,
        /// Admin password.
        password: String,
    },
    /// Clear the admin session.
    AdminLogout,
    /// Ask the service to issue a member verification code.
    MemberSendCode {
        /// Registered mobile number.
        mobile_number: String,
    },
    /// Exchange a previously issued code for a member session.
    MemberVerify {
        /// Registered mobile number the code was issued for.
        mobile_number: String,
        /// The one-time code.
        code: String,
    },
    /// Clear the member session.
    MemberLogout,
    /// List active categories with their programmes and sub-projects.
    Categories,
    /// Verify a client's mobile number for employment registration.
    RegisterVerify {
        /// Registered mobile number.
        mobile_number: String,
    },
    /// Submit an employment registration after verification.
    RegisterSubmit {
        /// Registered mobile number.
        mobile_number: String,
        /// Identifier of the selected category.
        category_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %error, "tracing init failed");
    }

    let cli = Cli::parse();
    // Environment and file configuration only; the CLI owns the argument list.
    let settings = PortalSettings::load_from_iter([OsString::from("portal")])?;
    let service = RestDataService::from_settings(&settings)?;
    let storage = Arc::new(FileSessionStorage::open(settings.storage_dir())?);
    let sessions = Arc::new(SessionStore::new(storage));
    sessions.restore();

    match cli.command {
        Command::Status => {
            match sessions.admin() {
                Some(admin) => println!(
                    "admin: {} ({})",
                    admin.username(),
                    admin.role().as_str()
                ),
                None => println!("admin: not logged in"),
            }
            match sessions.member() {
                Some(member) => println!(
                    "member: {} ({})",
                    member.mobile_number(),
                    member.name().unwrap_or("unnamed")
                ),
                None => println!("member: not logged in"),
            }
        }
        Command::AdminLogin { username, password } => {
            let auth = AdminAuthService::new(
                Arc::new(RestAdminDirectory::new(service)),
                Arc::clone(&sessions),
            );
            let identity = auth.login(&username, &password).await?;
            println!("logged in as {} ({})", identity.username(), identity.role().as_str());
        }
        Command::AdminLogout => {
            AdminAuthService::new(
                Arc::new(RestAdminDirectory::new(service)),
                Arc::clone(&sessions),
            )
            .logout();
            println!("admin session cleared");
        }
        Command::MemberSendCode { mobile_number } => {
            let auth = MemberAuthService::new(
                Arc::new(RestMemberVerification::new(service)),
                Arc::clone(&sessions),
            );
            let mut flow = MemberAuthFlow::new();
            let challenge = auth
                .send_verification_code(&mut flow, &mobile_number)
                .await?;
            match challenge.verification_code {
                Some(code) => println!("verification code: {code}"),
                None => println!("verification code sent"),
            }
        }
        Command::MemberVerify {
            mobile_number,
            code,
        } => {
            let auth = MemberAuthService::new(
                Arc::new(RestMemberVerification::new(service)),
                Arc::clone(&sessions),
            );
            let mut flow = MemberAuthFlow::new();
            // The code was issued by an earlier invocation; rebuild the
            // awaiting-code state for this number.
            let mobile = portal::domain::MobileNumber::new(&mobile_number)?;
            flow.apply_code_sent(flow.generation(), mobile);
            let identity = auth.verify_and_login(&mut flow, &code).await?;
            println!("logged in as member {}", identity.mobile_number());
        }
        Command::MemberLogout => {
            MemberAuthService::new(
                Arc::new(RestMemberVerification::new(service)),
                Arc::clone(&sessions),
            )
            .logout();
            println!("member session cleared");
        }
        Command::Categories => {
            let catalogue =
                CatalogueService::new(Arc::new(RestCategoryCatalogue::new(service)));
            for overview in catalogue.category_overviews().await? {
                println!(
                    "{}: {} programmes, {} sub-projects",
                    overview.category.name,
                    overview.programmes.len(),
                    overview.sub_projects.len()
                );
            }
        }
        Command::RegisterVerify { mobile_number } => {
            let registration = registration_service(service);
            let mut flow = RegistrationFlow::new();
            let verification = registration
                .verify_mobile_number(&mut flow, &mobile_number)
                .await?;
            println!(
                "verified {} ({}, {})",
                verification.client.name, verification.client.category, verification.client.district
            );
            for category in &verification.categories {
                let marker = if verification.client.can_apply_for(&category.name) {
                    ""
                } else {
                    " (not eligible)"
                };
                println!("  {} {}{marker}", category.id, category.name);
            }
        }
        Command::RegisterSubmit {
            mobile_number,
            category_id,
        } => {
            let registration = registration_service(service);
            let mut flow = RegistrationFlow::new();
            registration
                .verify_mobile_number(&mut flow, &mobile_number)
                .await?;
            registration
                .submit_registration(&mut flow, &category_id)
                .await?;
            println!("registration submitted");
        }
    }
    Ok(())
}

fn registration_service(
    service: RestDataService,
) -> RegistrationService<RestClientDirectory, RestCategoryCatalogue, RestRegistrationRepository> {
    RegistrationService::new(
        Arc::new(RestClientDirectory::new(service.clone())),
        Arc::new(RestCategoryCatalogue::new(service.clone())),
        Arc::new(RestRegistrationRepository::new(service)),
    )
}
