use super::*;

/// Spawn the "LEVEL N" banner shown between levels.
pub fn setup_level_banner(mut commands: Commands, game: Res<Game>) {
    let level = game.scene().level();
    commands
        .spawn((overlay_root(), ZIndex(200), LevelBannerRoot))
        .with_children(|root| {
            root.spawn((
                Text::new(format!("LEVEL {level}")),
                TextFont {
                    font_size: 56.0,
                    ..default()
                },
                TextColor(title_color()),
            ));

            spacer(root, 10.0);

            root.spawn((
                Text::new(format!("Score: {}", game.scene().score())),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(subtitle_color()),
            ));
        });
}

/// Despawn the level banner.
pub fn cleanup_level_banner(mut commands: Commands, query: Query<Entity, With<LevelBannerRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}
