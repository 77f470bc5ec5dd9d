use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use concord_views::config::{DEFAULT_CONFIG_PATH, ViewsConfig};
use concord_views::selectors::{channels, general, teams, users};
use concord_views::snapshot::load_snapshot;
use concord_views::{GlobalState, Views};

/// Inspect derived views of a chat client state snapshot
#[derive(Parser)]
#[command(name = "concord-views")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Snapshot to load, overriding the config file
    #[arg(short, long)]
    snapshot: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum TeamFilter {
    Mine,
    Joinable,
    Listable,
}

#[derive(Subcommand)]
enum Commands {
    /// Current user, team and badge counts
    Summary,

    /// Teams the current user belongs to or could reach
    Teams {
        #[arg(long, value_enum, default_value = "mine")]
        filter: TeamFilter,
        /// Order by display name
        #[arg(long)]
        sorted: bool,
    },

    /// Effective permissions of the current user. Without a scope the
    /// system-wide set is printed.
    Permissions {
        #[arg(long)]
        team: Option<String>,
        /// Requires --team, or falls back to the current team
        #[arg(long)]
        channel: Option<String>,
        #[arg(long, conflicts_with_all = ["team", "channel"])]
        group: Option<String>,
    },

    /// Followed threads in a team, newest first
    Threads {
        /// Defaults to the current team
        #[arg(long)]
        team: Option<String>,
        #[arg(long)]
        unread: bool,
        #[arg(long)]
        selected: Option<String>,
    },

    /// Groups that may be mentioned in a channel
    Groups {
        #[arg(long)]
        team: String,
        #[arg(long)]
        channel: String,
        /// Only names starting with this prefix
        #[arg(long)]
        prefix: Option<String>,
    },

    /// Unread totals across the current user's channels in a team
    Unreads {
        #[arg(long)]
        team: Option<String>,
    },

    /// URL schemes rendered as links
    UrlSchemes,

    /// Current colour theme, missing colours filled in
    Theme,
}

fn emit<T: Serialize + ?Sized>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}

fn team_or_current(state: &GlobalState, team: Option<String>) -> String {
    team.unwrap_or_else(|| teams::get_current_team_id(state).to_string())
}

fn run(command: Commands, state: &GlobalState, views: &Views, pretty: bool) -> anyhow::Result<()> {
    match command {
        Commands::Summary => emit(
            &json!({
                "current_user_id": users::get_current_user_id(state),
                "locale": users::get_current_user_locale(state),
                "system_admin": users::is_current_user_system_admin(state),
                "current_team_id": teams::get_current_team_id(state),
                "team_url": teams::current_team_url(state),
                "my_teams": views.my_teams_count(state),
                "other_team_mentions": teams::channel_drawer_badge_count(state),
                "team_permissions_compatible":
                    general::is_compatible_with_join_view_team_permissions(state),
                "mobile_upload": general::can_upload_files_on_mobile(state),
                "mobile_download": general::can_download_files_on_mobile(state),
            }),
            pretty,
        ),
        Commands::Teams { filter, sorted } => {
            let list = match (filter, sorted) {
                (TeamFilter::Mine, false) => views.my_teams(state),
                (TeamFilter::Mine, true) => {
                    let ids = views.my_sorted_team_ids(state);
                    let ordered: Vec<_> = ids
                        .iter()
                        .filter_map(|id| teams::get_team(state, id).cloned())
                        .collect();
                    return emit(&ordered, pretty);
                }
                (TeamFilter::Joinable, false) => views.joinable_teams(state),
                (TeamFilter::Joinable, true) => views.sorted_joinable_teams(state),
                (TeamFilter::Listable, false) => views.listable_teams(state),
                (TeamFilter::Listable, true) => views.sorted_listable_teams(state),
            };
            emit(&*list, pretty)
        }
        Commands::Permissions {
            team,
            channel,
            group,
        } => {
            let permissions = match (group, team, channel) {
                (Some(group), _, _) => views.my_group_permissions(state, &group),
                (None, team, Some(channel)) => {
                    let team = team_or_current(state, team);
                    views.my_channel_permissions(state, &team, &channel)
                }
                (None, Some(team), None) => views.my_team_permissions(state, &team),
                (None, None, None) => views.my_system_permissions(state),
            };
            emit(&*permissions, pretty)
        }
        Commands::Threads {
            team,
            unread,
            selected,
        } => {
            let team = team_or_current(state, team);
            let order = if unread {
                views.unread_thread_order_in_team(state, &team, selected.as_deref())
            } else {
                views.thread_order_in_team(state, &team, selected.as_deref())
            };
            emit(&*order, pretty)
        }
        Commands::Groups {
            team,
            channel,
            prefix,
        } => {
            let groups = match prefix {
                Some(prefix) => {
                    views.search_associated_groups_for_reference(state, &prefix, &team, &channel)
                }
                None => views.associated_groups_for_reference(state, &team, &channel),
            };
            emit(&groups, pretty)
        }
        Commands::Unreads { team } => {
            let team = team_or_current(state, team);
            emit(&channels::team_unread_totals(state, &team), pretty)
        }
        Commands::UrlSchemes => emit(&*views.autolinked_url_schemes(state), pretty),
        Commands::Theme => emit(&*views.theme(state), pretty),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = ViewsConfig::load(&cli.config)?;
    if let Some(snapshot) = cli.snapshot {
        config.snapshot.path = snapshot;
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let state = load_snapshot(&config.snapshot.path)?;
    info!(snapshot = %config.snapshot.path, "querying snapshot");

    let views = Views::new();
    run(cli.command, &state, &views, cli.pretty || config.output.pretty)
}
