// Sidebar preview

use crate::context::CliContext;
use anyhow::Result;
use atrium_navigation::NavigationController;
use clap::Args;

#[derive(Args)]
pub struct NavArgs {
    /// Role to preview as; omit for an anonymous session
    #[arg(long)]
    pub role: Option<String>,

    /// Current route
    #[arg(long, default_value = "/")]
    pub route: String,

    /// Item titles to toggle, applied in order after navigating
    #[arg(long)]
    pub toggle: Vec<String>,
}

pub fn run(ctx: &CliContext, args: NavArgs) -> Result<()> {
    let role = args.role.as_deref().map(|id| ctx.role(id)).transpose()?;

    let mut nav = NavigationController::new(ctx.navigation.clone());
    let mut view = nav.set_route(args.route.as_str(), &role);
    for title in &args.toggle {
        view = nav.toggle(title, &role);
    }

    if ctx.json {
        return ctx.print_json(&view);
    }

    if view.is_empty() {
        println!("(nothing visible)");
        return Ok(());
    }
    if let Some(crumb) = nav.breadcrumb(&role) {
        println!("{crumb}\n");
    }
    print!("{view}");
    Ok(())
}
