// Guard evaluation

use crate::context::CliContext;
use anyhow::Result;
use atrium_authorization::{Guard, Requirement, Visibility};
use atrium_core::PermissionToken;
use clap::Args;
use serde_json::json;

#[derive(Args)]
pub struct CheckArgs {
    /// Role to evaluate against
    #[arg(long)]
    pub role: String,

    /// Required permission tokens (resource.action)
    #[arg(required = true, value_parser = parse_token)]
    pub tokens: Vec<PermissionToken>,

    /// Require every token instead of any one of them
    #[arg(long)]
    pub all: bool,
}

fn parse_token(raw: &str) -> Result<PermissionToken, String> {
    raw.parse().map_err(|e: atrium_core::AtriumError| e.to_string())
}

pub fn run(ctx: &CliContext, args: CheckArgs) -> Result<()> {
    let role = ctx.role(&args.role)?;
    let requirement = match <[PermissionToken; 1]>::try_from(args.tokens) {
        Ok([token]) => Requirement::token(token),
        Err(tokens) => Requirement::list(tokens, args.all),
    };
    let guard = Guard::new(requirement);
    let visibility = guard.evaluate(role);
    tracing::debug!(role = %role.id(), ?visibility, "guard evaluated");

    if ctx.json {
        return ctx.print_json(&json!({
            "role": role.id(),
            "requirement": guard.requirement(),
            "visible": visibility.is_visible(),
        }));
    }

    let verdict = match visibility {
        Visibility::Visible => "visible",
        Visibility::Hidden => "hidden",
    };
    println!("{verdict}");
    Ok(())
}
