// Role catalog inspection

use crate::context::CliContext;
use anyhow::Result;
use atrium_core::Role;
use clap::Args;

#[derive(Args)]
pub struct RolesArgs {
    /// Show only this role
    #[arg(long)]
    pub role: Option<String>,
}

pub fn run(ctx: &CliContext, args: RolesArgs) -> Result<()> {
    let roles: Vec<&Role> = match &args.role {
        Some(id) => vec![ctx.role(id)?],
        None => ctx.roles.list_roles().collect(),
    };

    if ctx.json {
        return ctx.print_json(&roles);
    }

    for role in roles {
        println!("{} ({})", role.name(), role.id());
        if !role.description().is_empty() {
            println!("  {}", role.description());
        }
        for token in role.permissions() {
            println!("    - {token}");
        }
    }
    Ok(())
}
