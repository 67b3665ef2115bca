//! Simulation plugin: drives [`Game`] from Bevy's fixed-timestep schedule.
//!
//! ## Systems
//!
//! | System                   | Schedule    | Purpose                                    |
//! |--------------------------|-------------|--------------------------------------------|
//! | `load_game_config`       | Startup     | Overlay `assets/game.toml` on the defaults |
//! | `init_game_system`       | Startup     | Insert [`Game`], set the tick rate         |
//! | `latch_input_system`     | Update      | Accumulate key edges for the next tick     |
//! | `game_tick_system`       | FixedUpdate | Run one simulation tick                    |
//! | `sync_game_state_system` | Update      | Mirror the scene kind into `GameState`     |
//! | `play_cues_system`       | Update      | Turn cue requests into audio entities      |

use crate::audio::{play_cues_system, CueBoard};
use crate::config::{load_game_config, GameConfig};
use crate::game::{Game, TickOutcome};
use crate::input::{latch_input_system, InputLatch};
use crate::menu::GameState;
use crate::save::FileHighScoreStore;
use crate::world::GameRng;
use bevy::prelude::*;
use rand::SeedableRng;

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameConfig>()
            .init_resource::<InputLatch>()
            .init_resource::<CueBoard>()
            .add_systems(Startup, (load_game_config, init_game_system).chain())
            .add_systems(
                Update,
                (
                    latch_input_system,
                    sync_game_state_system.run_if(resource_exists::<Game>),
                    play_cues_system,
                ),
            )
            .add_systems(
                FixedUpdate,
                game_tick_system.run_if(resource_exists::<Game>),
            );
    }
}

/// Insert the [`Game`] (unless one was provided up front) and set the fixed
/// tick rate from the config.
pub fn init_game_system(
    mut commands: Commands,
    config: Res<GameConfig>,
    existing: Option<Res<Game>>,
    mut fixed: ResMut<Time<Fixed>>,
) {
    fixed.set_timestep_hz(config.ticks_per_second);
    if existing.is_some() {
        return;
    }
    let store = FileHighScoreStore::new(&config.high_score_path);
    commands.insert_resource(Game::new(
        &config,
        Box::new(store),
        GameRng::from_entropy(),
    ));
    println!("✓ Game ready at {} ticks/s", config.ticks_per_second);
}

/// One simulation tick on the latched input.
pub fn game_tick_system(
    time: Res<Time>,
    config: Res<GameConfig>,
    mut game: ResMut<Game>,
    mut latch: ResMut<InputLatch>,
    mut board: ResMut<CueBoard>,
    mut exit: MessageWriter<AppExit>,
) {
    let dt = time.delta_secs();
    board.advance(dt);
    let input = latch.take();
    if game.update(&input, &mut *board, &config, dt) == TickOutcome::Quit {
        exit.write(AppExit::Success);
    }
}

/// Keep `GameState` equal to the active scene kind.
pub fn sync_game_state_system(
    game: Res<Game>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let wanted = GameState::from(game.kind());
    if *state.get() != wanted {
        next_state.set(wanted);
    }
}
