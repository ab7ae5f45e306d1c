use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use floorplan::config::{ConfigError, EditorConfig};
use floorplan::element::{ElementId, TableShape};
use floorplan::error::EditError;
use floorplan::factory::Placeable;
use floorplan::geometry::{Point, Rect, Size};
use floorplan::hit::hit_test;
use floorplan::input::{Button, Modifiers, Tool};
use floorplan::plan::{FloorId, FloorPlan};
use floorplan::session::{Action, EditorSession};
use floorplan::store::{FilePlanStore, PlanId, PlanStore, StoreError};
use floorplan::transform::NodeTransform;
use serde_json::{Value, json};
use tracing::info;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("edit rejected: {0}")]
    Edit(#[from] EditError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "floorplan", about = "Edit restaurant floor plans stored on disk")]
struct Cli {
    /// Directory holding one `<plan-id>.json` per plan.
    #[arg(long, env = "FLOORPLAN_STORE_DIR", default_value = ".floorplans")]
    store_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an empty plan and print its id.
    New {
        #[arg(long, default_value = "Ground floor")]
        floor_name: String,
    },
    /// Print a plan, or one floor's elements.
    Show {
        plan: String,
        #[arg(long)]
        floor: Option<String>,
    },
    Floor(FloorCommand),
    /// Place a default-sized element at a scene point on the current floor.
    Place {
        plan: String,
        kind: Kind,
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        at: Point,
    },
    /// Draw a wall between two scene points.
    Wall {
        plan: String,
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        from: Point,
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        to: Point,
    },
    /// Drop an element at a new position (snapped).
    Move {
        plan: String,
        element: String,
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        to: Point,
    },
    /// Scale an element; the scale is folded into its size.
    Resize {
        plan: String,
        element: String,
        #[arg(long, default_value_t = 1.0)]
        scale_x: f64,
        #[arg(long, default_value_t = 1.0)]
        scale_y: f64,
    },
    Rotate {
        plan: String,
        element: String,
        #[arg(allow_negative_numbers = true)]
        degrees: f64,
    },
    /// Group two or more elements.
    Group {
        plan: String,
        #[arg(num_args = 2.., required = true)]
        elements: Vec<String>,
    },
    Ungroup {
        plan: String,
        group: String,
    },
    /// Delete elements. Deleting a group keeps its members.
    Delete {
        plan: String,
        #[arg(required = true)]
        elements: Vec<String>,
    },
    /// Print the ids a marquee between two scene points would select.
    Select {
        plan: String,
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        from: Point,
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        to: Point,
    },
    /// Print the top-most element under a scene point.
    Hit {
        plan: String,
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        at: Point,
    },
    /// Fit the stage into a viewport of the given pixel size and store the view.
    Fit {
        plan: String,
        #[arg(long)]
        width: f64,
        #[arg(long)]
        height: f64,
    },
}

#[derive(Args, Debug)]
struct FloorCommand {
    #[command(subcommand)]
    command: FloorSubcommand,
}

#[derive(Subcommand, Debug)]
enum FloorSubcommand {
    List { plan: String },
    Add { plan: String, name: String },
    Rename { plan: String, floor: String, name: String },
    Delete { plan: String, floor: String },
    Switch { plan: String, floor: String },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Kind {
    RoundTable,
    SquareTable,
    RectangleTable,
    OvalTable,
    Wall,
    Door,
    Window,
}

impl Kind {
    fn placeable(self) -> Placeable {
        match self {
            Self::RoundTable => Placeable::Table(TableShape::Circle),
            Self::SquareTable => Placeable::Table(TableShape::Square),
            Self::RectangleTable => Placeable::Table(TableShape::Rectangle),
            Self::OvalTable => Placeable::Table(TableShape::Oval),
            Self::Wall => Placeable::Wall,
            Self::Door => Placeable::Door,
            Self::Window => Placeable::Window,
        }
    }
}

fn parse_point(raw: &str) -> Result<Point, String> {
    let (x, y) = raw.split_once(',').ok_or_else(|| format!("expected X,Y, got {raw:?}"))?;
    let x = x.trim().parse::<f64>().map_err(|e| format!("bad x in {raw:?}: {e}"))?;
    let y = y.trim().parse::<f64>().map_err(|e| format!("bad y in {raw:?}: {e}"))?;
    Ok(Point::new(x, y))
}

/// The plan store plus the editor tunables every session is opened with.
struct Workspace {
    store: FilePlanStore,
    config: EditorConfig,
}

impl Workspace {
    fn open(&self, plan: &str) -> Result<(PlanId, EditorSession), CliError> {
        let id = PlanId::new(plan);
        let plan = self.store.load(&id)?;
        Ok((id, EditorSession::new(plan, self.config)))
    }

    fn commit(&mut self, id: &PlanId, session: &EditorSession) -> Result<(), CliError> {
        self.store.update(id, &session.snapshot())?;
        Ok(())
    }

    /// Open a plan, run one edit, save, and print what changed.
    fn edit(
        &mut self,
        plan: &str,
        f: impl FnOnce(&mut EditorSession) -> Result<Vec<Action>, CliError>,
    ) -> Result<(), CliError> {
        let (id, mut session) = self.open(plan)?;
        let actions = f(&mut session)?;
        self.commit(&id, &session)?;
        report(&actions)
    }
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = EditorConfig::from_env()?;
    let mut ws = Workspace { store: FilePlanStore::new(cli.store_dir), config };

    match cli.command {
        Command::New { floor_name } => {
            let id = ws.store.save(&FloorPlan::new(floor_name))?;
            info!(plan = %id, "created plan");
            println!("{id}");
            Ok(())
        }
        Command::Show { plan, floor } => run_show(&ws, &plan, floor),
        Command::Floor(cmd) => run_floor(&mut ws, cmd),
        Command::Place { plan, kind, at } => ws.edit(&plan, |s| Ok(s.place_element(kind.placeable(), at))),
        Command::Wall { plan, from, to } => ws.edit(&plan, |s| Ok(draw_wall(s, from, to))),
        Command::Move { plan, element, to } => {
            ws.edit(&plan, |s| Ok(s.move_element(&ElementId::new(element), to)?))
        }
        Command::Resize { plan, element, scale_x, scale_y } => ws.edit(&plan, |s| {
            let id = ElementId::new(element);
            let current = s.element(&id).ok_or_else(|| EditError::UnknownElement(id.clone()))?;
            let mut node = NodeTransform { scale_x, scale_y, ..NodeTransform::of(current) };
            Ok(s.commit_transform(&id, &mut node)?)
        }),
        Command::Rotate { plan, element, degrees } => {
            ws.edit(&plan, |s| Ok(s.rotate_element(&ElementId::new(element), degrees)?))
        }
        Command::Group { plan, elements } => ws.edit(&plan, |s| {
            select_all(s, &elements);
            Ok(s.group_selection()?)
        }),
        Command::Ungroup { plan, group } => ws.edit(&plan, |s| Ok(s.ungroup(&ElementId::new(group))?)),
        Command::Delete { plan, elements } => ws.edit(&plan, |s| {
            for raw in &elements {
                let id = ElementId::new(raw.as_str());
                if s.element(&id).is_none() {
                    return Err(EditError::UnknownElement(id).into());
                }
            }
            select_all(s, &elements);
            Ok(s.delete_selected()?)
        }),
        Command::Select { plan, from, to } => {
            let (_, mut session) = ws.open(&plan)?;
            session.select_in_rect(&Rect::from_corners(from, to));
            print_json(&serde_json::to_value(session.selection.ids())?)
        }
        Command::Hit { plan, at } => {
            let (_, session) = ws.open(&plan)?;
            let hit = hit_test(at, session.floors.active());
            print_json(&serde_json::to_value(hit)?)
        }
        Command::Fit { plan, width, height } => ws.edit(&plan, |s| Ok(s.fit_to_stage(Size::new(width, height)))),
    }
}

fn run_show(ws: &Workspace, plan: &str, floor: Option<String>) -> Result<(), CliError> {
    let (_, session) = ws.open(plan)?;
    let Some(floor) = floor else {
        println!("{}", session.floors.plan().to_json().map_err(StoreError::from)?);
        return Ok(());
    };
    let id = FloorId::new(floor);
    let floor = session.floors.plan().floor(&id).ok_or(EditError::UnknownFloor(id))?;
    print_json(&serde_json::to_value(&floor.elements)?)
}

fn run_floor(ws: &mut Workspace, cmd: FloorCommand) -> Result<(), CliError> {
    match cmd.command {
        FloorSubcommand::List { plan } => {
            let (_, session) = ws.open(&plan)?;
            let active = session.floors.active_id();
            let floors: Vec<Value> = session
                .floors
                .floors()
                .iter()
                .map(|f| {
                    json!({
                        "id": f.id.as_str(),
                        "name": f.name,
                        "level": f.level,
                        "elements": f.elements.len(),
                        "current": &f.id == active,
                    })
                })
                .collect();
            print_json(&Value::Array(floors))
        }
        FloorSubcommand::Add { plan, name } => ws.edit(&plan, |s| {
            let (_, actions) = s.add_floor(&name);
            Ok(actions)
        }),
        FloorSubcommand::Rename { plan, floor, name } => ws.edit(&plan, |s| {
            s.rename_floor(&FloorId::new(floor), &name)?;
            Ok(Vec::new())
        }),
        FloorSubcommand::Delete { plan, floor } => ws.edit(&plan, |s| Ok(s.delete_floor(&FloorId::new(floor))?)),
        FloorSubcommand::Switch { plan, floor } => ws.edit(&plan, |s| Ok(s.switch_floor(&FloorId::new(floor))?)),
    }
}

/// Replay a wall drag through the session's pointer handlers.
fn draw_wall(session: &mut EditorSession, from: Point, to: Point) -> Vec<Action> {
    let down = session.viewport.scene_to_screen(from);
    let up = session.viewport.scene_to_screen(to);
    let mut actions = session.set_tool(Tool::Wall);
    actions.extend(session.on_pointer_down(down, Button::Primary, Modifiers::default()));
    actions.extend(session.on_pointer_move(up, Modifiers::default()));
    actions.extend(session.on_pointer_up(up, Button::Primary, Modifiers::default()));
    actions
}

/// Replace the selection with the given ids, in order, ignoring repeats.
fn select_all(session: &mut EditorSession, raw_ids: &[String]) {
    session.select_element(None, false);
    for raw in raw_ids {
        let id = ElementId::new(raw.as_str());
        if !session.selection.is_selected(&id) {
            session.select_element(Some(id), true);
        }
    }
}

fn report(actions: &[Action]) -> Result<(), CliError> {
    let mut changes = Vec::new();
    for action in actions {
        let change = match action {
            Action::ElementCreated(e) => json!({ "created": serde_json::to_value(e)? }),
            Action::ElementUpdated(e) => json!({ "updated": serde_json::to_value(e)? }),
            Action::ElementDeleted { id } => json!({ "deleted": id.as_str() }),
            Action::FloorSwitched { id } => json!({ "floor": id.as_str() }),
            Action::SelectionChanged | Action::ViewportChanged | Action::RenderNeeded => continue,
        };
        changes.push(change);
    }
    print_json(&Value::Array(changes))
}

fn print_json(value: &Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
