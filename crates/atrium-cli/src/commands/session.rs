// Scripted demo session

use crate::context::CliContext;
use crate::demo;
use anyhow::Result;
use atrium_authorization::SessionManager;
use atrium_core::effects::UserDirectoryEffects;
use atrium_core::{PermissionQuery, PermissionToken, RoleId, UserId};
use atrium_effects::InMemoryIdentityHandler;
use clap::Args;
use serde_json::json;

#[derive(Args)]
pub struct SessionArgs {
    /// User to sign in as (defaults to the configured user)
    #[arg(long)]
    pub user: Option<String>,

    /// Override the role after loading
    #[arg(long)]
    pub set_role: Option<String>,

    /// Switch to another user after loading
    #[arg(long)]
    pub switch_to: Option<String>,

    /// End the session at the end of the script
    #[arg(long)]
    pub logout: bool,

    /// Tokens to query after each step
    #[arg(long = "query")]
    pub queries: Vec<String>,

    /// List the demo directory and exit
    #[arg(long)]
    pub list_users: bool,
}

pub async fn run(ctx: &CliContext, args: SessionArgs) -> Result<()> {
    let identity = demo::demo_identity();

    if args.list_users {
        let users = identity.list_users().await?;
        if ctx.json {
            return ctx.print_json(&users);
        }
        for user in users {
            println!(
                "{}  {:<20} {:<20} {}",
                user.id, user.display_name, user.role_id, user.status
            );
        }
        return Ok(());
    }

    let queries = args
        .queries
        .iter()
        .map(|raw| PermissionToken::parse(raw.as_str()))
        .collect::<Result<Vec<_>, _>>()?;

    let start = args
        .user
        .map(UserId::new)
        .or_else(|| ctx.config.default_user.clone())
        .unwrap_or_else(|| UserId::new(demo::DEFAULT_USER));
    let identity = identity.signed_in_as(start);
    let manager = SessionManager::new(identity, ctx.roles.clone());
    let mut steps = Vec::new();

    manager.load_session().await;
    report(ctx, &manager, "load", &queries, &mut steps);

    if let Some(role) = &args.set_role {
        let applied = manager.set_role(&RoleId::new(role.as_str()));
        let step = if applied { "set-role" } else { "set-role (ignored)" };
        report(ctx, &manager, step, &queries, &mut steps);
    }

    if let Some(user) = &args.switch_to {
        manager.switch_user(&UserId::new(user.as_str())).await;
        report(ctx, &manager, "switch-user", &queries, &mut steps);
    }

    if args.logout {
        manager.logout().await;
        report(ctx, &manager, "logout", &queries, &mut steps);
    }

    if ctx.json {
        return ctx.print_json(&steps);
    }
    Ok(())
}

fn report(
    ctx: &CliContext,
    manager: &SessionManager<InMemoryIdentityHandler>,
    step: &str,
    queries: &[PermissionToken],
    steps: &mut Vec<serde_json::Value>,
) {
    let session = manager.snapshot();
    let answers: Vec<_> = queries
        .iter()
        .map(|token| (token.as_str(), manager.has_permission(token)))
        .collect();

    if ctx.json {
        steps.push(json!({
            "step": step,
            "phase": manager.phase(),
            "session": session,
            "last_failure": manager.last_failure(),
            "queries": answers
                .iter()
                .map(|(token, granted)| (token.to_string(), json!(granted)))
                .collect::<serde_json::Map<_, _>>(),
        }));
        return;
    }

    println!("[{step}] {session} ({})", manager.phase());
    if let Some(failure) = manager.last_failure() {
        println!("    failure: {failure}");
    }
    for (token, granted) in answers {
        println!("    {token}: {}", if granted { "granted" } else { "denied" });
    }
}
