//! DIY Build Planner
//!
//! Command line front end for plan generation, the quick build catalog and
//! the build journal.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use rusqlite::Connection;
use tracing::debug;
use uuid::Uuid;

use diy_planner::config::{self, PlannerConfig};
use diy_planner::models::{
    BudgetTier, BuildPlan, BuildPlanRequest, BuildStatus, Dimensions, ProjectSize, ProjectType,
    SkillLevel, SpaceType, Style,
};
use diy_planner::quick_builds::{self, QuickBuildFilter};
use diy_planner::{db, generate_plan, import, logging, render, tools, units};

#[derive(Parser)]
#[command(name = "diy-planner")]
#[command(about = "Build plans and a project journal for DIY furniture")]
struct Cli {
    /// Path to the SQLite journal (overrides DIY_PLANNER_DB and the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a build plan
    Plan(PlanArgs),

    /// Generate the demo plan: a modern medium shelf for a beginner
    Demo {
        #[arg(long)]
        json: bool,
    },

    /// Tool availability and alternatives
    Tools {
        #[command(subcommand)]
        command: ToolsCommand,
    },

    /// Suggest project ideas for a space (room, wall, corner, balcony, garage, other)
    Suggest { space: String },

    /// Browse and import quick build templates
    Quick {
        #[command(subcommand)]
        command: QuickCommand,
    },

    /// Manage saved plans
    Saved {
        #[command(subcommand)]
        command: SavedCommand,
    },

    /// Track builds of saved plans
    Build {
        #[command(subcommand)]
        command: BuildCommand,
    },

    /// Initialize an empty journal
    Init,
}

#[derive(Args)]
struct PlanArgs {
    /// Space type: room, wall, corner, balcony, garage, other
    #[arg(long, default_value = "room")]
    space: String,

    /// Space dimensions in feet, e.g. 8x10, 8x10x8 or "2 1/2x4"
    #[arg(long)]
    dimensions: String,

    /// Read dimensions as centimetres and show the space in centimetres
    #[arg(long)]
    metric: bool,

    /// Project type: shelf, desk, storage, furniture, decor, other
    #[arg(long = "type", default_value = "shelf")]
    project_type: String,

    /// Project size: small, medium, large, custom
    #[arg(long, default_value = "medium")]
    size: String,

    /// Style: modern, rustic, scandinavian, industrial, minimalist, traditional
    #[arg(long, default_value = "modern")]
    style: String,

    /// Skill level: beginner, intermediate, advanced
    #[arg(long, default_value = "beginner")]
    skill: String,

    /// Budget: budget, moderate, premium
    #[arg(long, default_value = "moderate")]
    budget: String,

    /// Preferred materials (free text)
    #[arg(long)]
    materials: Option<String>,

    /// Constraints or notes (free text)
    #[arg(long)]
    constraints: Option<String>,

    /// A tool you own; repeat for each tool
    #[arg(long = "tool")]
    tools: Vec<String>,

    /// Print the plan as JSON
    #[arg(long)]
    json: bool,

    /// Save the plan to the journal
    #[arg(long)]
    save: bool,
}

#[derive(Subcommand)]
enum ToolsCommand {
    /// Check required tools against the ones you own
    Check {
        /// Tools the project needs
        #[arg(required = true)]
        required: Vec<String>,

        /// Tools you own
        #[arg(long, num_args = 1..)]
        have: Vec<String>,
    },

    /// Show alternatives and whether a tool is essential
    Info { tool: String },
}

#[derive(Subcommand)]
enum QuickCommand {
    /// List quick builds
    List {
        #[arg(long)]
        difficulty: Option<String>,

        #[arg(long)]
        category: Option<String>,
    },

    /// Show a quick build
    Show {
        id: String,

        /// Tools you own
        #[arg(long, num_args = 1..)]
        have: Vec<String>,
    },

    /// Import quick build templates from a directory of JSON files
    Import { dir: PathBuf },
}

#[derive(Subcommand)]
enum SavedCommand {
    /// List saved plans
    List,

    /// Show a saved plan
    Show {
        id: String,

        #[arg(long)]
        json: bool,
    },

    /// Delete a saved plan and its builds
    Delete { id: String },
}

#[derive(Subcommand)]
enum BuildCommand {
    /// Start tracking a build of a saved plan
    Start { plan_id: String },

    /// Move a build to planned, in-progress, completed or abandoned
    Status { id: String, status: String },

    /// Record actual cost, time or notes
    Log {
        id: String,

        #[arg(long)]
        cost: Option<f64>,

        #[arg(long)]
        time: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Rate a build from 1 to 5
    Rate {
        id: String,
        rating: u8,

        #[arg(long)]
        review: Option<String>,
    },

    /// List builds
    List {
        #[arg(long)]
        status: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(config::config_path);
    let file = config::load(&config_path)?;
    let cfg = PlannerConfig::resolve(cli.database.clone(), file);

    logging::init(&cfg.log_level);
    debug!(
        config = %config_path.display(),
        database = %cfg.database.display(),
        "resolved configuration"
    );

    match cli.command {
        Commands::Plan(args) => run_plan(&cfg, args)?,

        Commands::Demo { json } => {
            let plan = generate_plan(&demo_request());
            print_plan(&plan, json)?;
        }

        Commands::Tools { command } => run_tools(command),

        Commands::Suggest { space } => {
            let space = SpaceType::parse_strict(&space)?;
            println!("Project ideas for a {space}:");
            for idea in diy_planner::suggest_projects(&space) {
                println!("  - {idea}");
            }
        }

        Commands::Quick { command } => run_quick(&cfg, command)?,

        Commands::Saved { command } => run_saved(&cfg, command)?,

        Commands::Build { command } => run_build(&cfg, command)?,

        Commands::Init => {
            open_journal(&cfg)?;
            println!("Journal initialized at: {}", cfg.database.display());
        }
    }

    Ok(())
}

fn open_journal(cfg: &PlannerConfig) -> Result<Connection> {
    let conn = Connection::open(&cfg.database)
        .with_context(|| format!("failed to open journal {}", cfg.database.display()))?;
    db::init_schema(&conn)?;
    Ok(conn)
}

fn demo_request() -> BuildPlanRequest {
    BuildPlanRequest {
        space_type: SpaceType::Room,
        dimensions: Dimensions {
            width: 8.0,
            length: 10.0,
            height: Some(8.0),
        },
        project_type: ProjectType::Shelf,
        project_size: ProjectSize::Medium,
        style: Style::Modern,
        skill_level: SkillLevel::Beginner,
        budget: BudgetTier::Moderate,
        materials: None,
        constraints: None,
        available_tools: Vec::new(),
    }
}

fn print_plan(plan: &BuildPlan, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(plan)?);
    } else {
        print!("{plan}");
    }
    Ok(())
}

fn run_plan(cfg: &PlannerConfig, args: PlanArgs) -> Result<()> {
    let dimensions = if args.metric {
        units::parse_metric_dimensions(&args.dimensions)?
    } else {
        units::parse_dimensions(&args.dimensions)?
    };
    let available_tools = if args.tools.is_empty() {
        cfg.tools.clone()
    } else {
        args.tools
    };

    let request = BuildPlanRequest {
        space_type: SpaceType::parse_strict(&args.space)?,
        dimensions: units::with_default_height(dimensions, cfg.default_height_ft),
        project_type: ProjectType::parse_strict(&args.project_type)?,
        project_size: ProjectSize::parse_strict(&args.size)?,
        style: Style::parse_strict(&args.style)?,
        skill_level: SkillLevel::parse_strict(&args.skill)?,
        budget: BudgetTier::parse_strict(&args.budget)?,
        materials: args.materials,
        constraints: args.constraints,
        available_tools,
    };
    units::validate_request(&request)?;

    let plan = generate_plan(&request);
    if args.metric && !args.json {
        print!("{}", render::MetricPlan(&plan));
    } else {
        print_plan(&plan, args.json)?;
    }

    if !args.json && !request.available_tools.is_empty() {
        let readiness =
            tools::filter_tools_by_availability(&plan.tools, &request.available_tools);
        println!();
        print!("{readiness}");
    }

    if args.save {
        let conn = open_journal(cfg)?;
        db::save_plan(&conn, &plan)?;
        // Keep stdout valid JSON when --json is set
        eprintln!("Saved plan {}", plan.id);
    }
    Ok(())
}

fn run_tools(command: ToolsCommand) {
    match command {
        ToolsCommand::Check { required, have } => {
            let result = tools::filter_tools_by_availability(&required, &have);
            print!("{result}");
        }
        ToolsCommand::Info { tool } => {
            let essential = if tools::is_tool_essential(&tool) {
                "essential"
            } else {
                "not essential"
            };
            println!("{tool}: {essential}");
            let alternatives = tools::get_tool_alternatives(&tool);
            if alternatives.is_empty() {
                println!("  No known alternatives");
            } else {
                println!("  Alternatives: {}", alternatives.join(", "));
            }
        }
    }
}

fn run_quick(cfg: &PlannerConfig, command: QuickCommand) -> Result<()> {
    let conn = open_journal(cfg)?;
    let catalog = || -> Result<_> {
        Ok(quick_builds::merge(
            quick_builds::builtin()?,
            db::list_quick_builds(&conn)?,
        ))
    };

    match command {
        QuickCommand::List {
            difficulty,
            category,
        } => {
            let filter = QuickBuildFilter {
                difficulty: difficulty
                    .as_deref()
                    .map(SkillLevel::parse_strict)
                    .transpose()?,
                category,
            };
            let matching: Vec<_> = catalog()?
                .into_iter()
                .filter(|b| filter.matches(b))
                .collect();
            if matching.is_empty() {
                println!("No quick builds match.");
            } else {
                print!("{}", render::format_quick_build_list(&matching));
            }
        }
        QuickCommand::Show { id, have } => {
            let catalog = catalog()?;
            let build = quick_builds::find(&catalog, &id)
                .ok_or_else(|| anyhow!("quick build '{id}' not found"))?;
            print!("{build}");

            let owned = if have.is_empty() { &cfg.tools } else { &have };
            if !owned.is_empty() {
                println!();
                print!("{}", build.tool_readiness(owned));
            }
        }
        QuickCommand::Import { dir } => {
            let stats = import::import_to_database(&conn, &dir)?;
            println!("{stats}");
        }
    }
    Ok(())
}

fn run_saved(cfg: &PlannerConfig, command: SavedCommand) -> Result<()> {
    let conn = open_journal(cfg)?;
    match command {
        SavedCommand::List => {
            let plans = db::list_plans(&conn)?;
            if plans.is_empty() {
                println!("No saved plans. Run 'plan --save' first.");
            } else {
                print!("{}", render::format_plan_list(&plans));
            }
        }
        SavedCommand::Show { id, json } => {
            let plan = db::get_plan(&conn, &id)?.ok_or_else(|| anyhow!("plan '{id}' not found"))?;
            print_plan(&plan, json)?;
        }
        SavedCommand::Delete { id } => {
            if db::delete_plan(&conn, &id)? {
                println!("Deleted plan {id}");
            } else {
                println!("Plan '{id}' not found");
            }
        }
    }
    Ok(())
}

fn run_build(cfg: &PlannerConfig, command: BuildCommand) -> Result<()> {
    let conn = open_journal(cfg)?;
    let load = |id: &str| -> Result<_> {
        db::get_build(&conn, id)?.ok_or_else(|| anyhow!("build '{id}' not found"))
    };

    match command {
        BuildCommand::Start { plan_id } => {
            let build = db::create_build(&conn, Uuid::new_v4().to_string(), &plan_id)?;
            println!("Started build {} ({})", build.id, build.status);
        }
        BuildCommand::Status { id, status } => {
            let next: BuildStatus = status.parse()?;
            let mut build = load(&id)?;
            build.transition(next, Utc::now())?;
            db::update_build(&conn, &build)?;
            print!("{build}");
        }
        BuildCommand::Log {
            id,
            cost,
            time,
            notes,
        } => {
            let mut build = load(&id)?;
            if cost.is_some() {
                build.actual_cost = cost;
            }
            if time.is_some() {
                build.actual_time = time;
            }
            if notes.is_some() {
                build.notes = notes;
            }
            db::update_build(&conn, &build)?;
            print!("{build}");
        }
        BuildCommand::Rate { id, rating, review } => {
            let mut build = load(&id)?;
            build.rate(rating, review)?;
            db::update_build(&conn, &build)?;
            print!("{build}");
        }
        BuildCommand::List { status } => {
            let status = status.as_deref().map(str::parse::<BuildStatus>).transpose()?;
            let builds = db::list_builds(&conn, status)?;
            if builds.is_empty() {
                println!("No builds recorded.");
            }
            for build in builds {
                println!("{:<38} {:<12} plan {}", build.id, build.status, build.plan_id);
            }
        }
    }
    Ok(())
}
