use transit_catalogue::{
    persistence::Database, render::Color, Catalogue, RenderSettings,
};

fn sample_render_settings() -> RenderSettings {
    RenderSettings {
        width: 600.0,
        height: 400.0,
        padding: 50.0,
        line_width: 14.0,
        stop_radius: 5.0,
        bus_label_font_size: 20,
        bus_label_offset: (7.0, 15.0),
        stop_label_font_size: 18,
        stop_label_offset: (7.0, -3.0),
        underlayer_color: Color::Named("white".into()),
        underlayer_width: 3.0,
        color_palette: vec![Color::Named("green".into()), Color::Rgb(255, 160, 0)],
    }
}

#[test]
fn persisted_render_settings_survive_a_round_trip() {
    let mut catalogue = Catalogue::new();
    catalogue.add_stop("A", 55.0, 37.0).unwrap();
    catalogue.add_stop("B", 55.0, 37.02).unwrap();
    catalogue.set_distance("A", "B", 1000).unwrap();
    catalogue.set_distance("B", "A", 1000).unwrap();
    catalogue
        .add_bus("1", &["A".into(), "B".into()], false)
        .unwrap();

    let database = Database {
        catalogue,
        render_settings: Some(sample_render_settings()),
        routing: None,
    };
    let bytes = database.to_bytes().unwrap();
    let restored = Database::from_bytes(&bytes).unwrap();

    let restored_settings = restored.render_settings.unwrap();
    assert_eq!(restored_settings.width, 600.0);
    assert_eq!(restored_settings.color_palette.len(), 2);

    let drawing = transit_catalogue::render_map(&restored.catalogue, &restored_settings);
    assert!(drawing.contains("<svg"));
    assert_eq!(drawing.matches("<polyline").count(), 1);
}
