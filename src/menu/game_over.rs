use super::*;
use crate::scene::Scene;

/// Spawn the game-over card centred over the drifting meteors.
///
/// Shows the final score, the record (flagged when just beaten), and the
/// Play Again / Quit buttons.  Restart is also bound to a key, see
/// [`crate::input::KEY_BINDINGS`].
pub fn setup_game_over(mut commands: Commands, game: Res<Game>) {
    let (score, level, new_record) = match game.scene() {
        Scene::GameOver(scene) => (scene.score, scene.level, scene.new_high_score),
        other => (other.score(), other.level(), false),
    };
    let best = game.high_score().best();

    commands
        .spawn((
            overlay_root(),
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.55)),
            ZIndex(300),
            GameOverRoot,
        ))
        .with_children(|overlay| {
            overlay
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        padding: UiRect::all(Val::Px(40.0)),
                        row_gap: Val::Px(16.0),
                        border: UiRect::all(Val::Px(2.0)),
                        min_width: Val::Px(320.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.06, 0.02, 0.02)),
                    BorderColor::all(Color::srgb(0.55, 0.10, 0.10)),
                ))
                .with_children(|card| {
                    card.spawn((
                        Text::new("GAME OVER"),
                        TextFont {
                            font_size: 46.0,
                            ..default()
                        },
                        TextColor(Color::srgb(1.0, 0.22, 0.22)),
                    ));

                    spacer(card, 4.0);

                    card.spawn((
                        Text::new(format!("Score: {score}   (level {level})")),
                        TextFont {
                            font_size: 18.0,
                            ..default()
                        },
                        TextColor(subtitle_color()),
                    ));

                    let record = if new_record {
                        format!("NEW HIGH SCORE: {best}")
                    } else {
                        format!("High score: {best}")
                    };
                    card.spawn((
                        Text::new(record),
                        TextFont {
                            font_size: 18.0,
                            ..default()
                        },
                        TextColor(if new_record {
                            title_color()
                        } else {
                            subtitle_color()
                        }),
                    ));

                    spacer(card, 8.0);

                    spawn_button(
                        card,
                        "PLAY AGAIN",
                        (again_bg(), again_border(), again_text()),
                        PlayAgainButton,
                    );
                    spawn_button(
                        card,
                        "QUIT",
                        (quit_bg(), quit_border(), quit_text()),
                        QuitButton,
                    );

                    card.spawn((
                        Text::new("Space / Enter to play again  ·  Q / Esc to quit"),
                        TextFont {
                            font_size: 12.0,
                            ..default()
                        },
                        TextColor(hint_color()),
                    ));
                });
        });
}

/// Spawn a labelled button; `colors` is (background, border, text).
fn spawn_button(
    parent: &mut ChildSpawnerCommands<'_>,
    label: &str,
    colors: (Color, Color, Color),
    marker: impl Component,
) {
    let (background, border, text) = colors;
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(220.0),
                height: Val::Px(50.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(background),
            BorderColor::all(border),
            marker,
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new(label),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(text),
            ));
        });
}

/// Despawn the game-over card.
pub fn cleanup_game_over(mut commands: Commands, query: Query<Entity, With<GameOverRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

/// Handle Play Again and Quit button presses.
///
/// - **Play Again** → applies [`Transition::Restart`] to the game; the state
///   mirror then leaves `GameOver`, which removes this card.
/// - **Quit** → sends [`AppExit`].
#[allow(clippy::type_complexity)]
pub fn game_over_button_system(
    again_query: Query<(&Interaction, &Children), (Changed<Interaction>, With<PlayAgainButton>)>,
    quit_query: Query<(&Interaction, &Children), (Changed<Interaction>, With<QuitButton>)>,
    mut btn_text: Query<&mut TextColor>,
    mut game: ResMut<Game>,
    mut board: ResMut<CueBoard>,
    config: Res<GameConfig>,
    mut exit: MessageWriter<AppExit>,
) {
    for (interaction, children) in again_query.iter() {
        let tint = match interaction {
            Interaction::Pressed => {
                game.apply_transition(Transition::Restart, &mut *board, &config);
                continue;
            }
            Interaction::Hovered => Color::WHITE,
            Interaction::None => again_text(),
        };
        for child in children.iter() {
            if let Ok(mut color) = btn_text.get_mut(child) {
                *color = TextColor(tint);
            }
        }
    }

    for (interaction, children) in quit_query.iter() {
        let tint = match interaction {
            Interaction::Pressed => {
                exit.write(AppExit::Success);
                continue;
            }
            Interaction::Hovered => Color::WHITE,
            Interaction::None => quit_text(),
        };
        for child in children.iter() {
            if let Ok(mut color) = btn_text.get_mut(child) {
                *color = TextColor(tint);
            }
        }
    }
}
