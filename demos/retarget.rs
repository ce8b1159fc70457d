use circle_graph::{Attributes, Circle, CircleGraph, Color, GraphCommand, GraphConfig};
use rand::Rng;
use simplelog::{Config as LogConfig, LevelFilter, SimpleLogger};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::init(LevelFilter::Info, LogConfig::default())?;

    let attributes = Attributes::new()
        .with("circle1Color", Color::new(0x3f, 0x51, 0xb5))
        .with("circle1InitialAngle", -90.0)
        .with("circle1EndAngle", 300.0)
        .with("circle2Color", Color::new(0xe9, 0x1e, 0x63))
        .with("circle2InitialAngle", -90.0)
        .with("circle2EndAngle", 200.0)
        .with("circle3Color", Color::new(0x00, 0x96, 0x88))
        .with("circle3InitialAngle", -90.0)
        .with("circle3EndAngle", 120.0);

    let config = GraphConfig::builder()
        .title("Circle Graph - retarget".to_string())
        .stroke_width_ratio(0.07)
        .build();

    let mut graph = CircleGraph::new(config, &attributes);

    let (sender, receiver) = mpsc::channel();

    // Let the startup sweep finish, then keep re-targeting one circle at a time.
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(5));
        let mut rng = rand::rng();
        loop {
            let command = if rng.random_range(0.0..1.0) < 0.1 {
                GraphCommand::Replay
            } else {
                GraphCommand::AnimateTo {
                    circle: Circle::ALL[rng.random_range(0..3)],
                    target: rng.random_range(30.0..360.0),
                    duration: Duration::from_millis(rng.random_range(500..2000)),
                }
            };
            if sender.send(command).is_err() {
                break;
            }
            thread::sleep(Duration::from_millis(2500));
        }
    });

    println!("Arcs re-target every few seconds. Close the window to exit.");
    graph.show_with_commands(receiver)
}
