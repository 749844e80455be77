mod viewer;

use hypocycloid::{ShapeParameters, ViewerConfig};
use viewer::App;

fn main() {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .unwrap();

    let mut app = App::new(ViewerConfig::default(), ShapeParameters::default());
    app.run();
}
