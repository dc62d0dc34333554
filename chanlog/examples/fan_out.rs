use chanlog::{Context, LogConfig, LogManager, Logger, LoggerConfig};

fn main() {
    let path = "/tmp/chanlog_example_fan_out.log";
    let _ = std::fs::remove_file(path);

    let config = LogConfig::new()
        .with_default("console")
        .with_logger("console", LoggerConfig::new("stdout").with_param("name", "console"))
        .with_logger(
            "audit",
            LoggerConfig::new("file")
                .with_param("filename", path)
                .with_param("name", "audit"),
        )
        .with_group("everywhere", &["console", "audit"]);
    let manager = LogManager::new(config);

    manager
        .info("Hello from the default channel", &Context::new())
        .unwrap();

    for i in 0..3 {
        manager
            .group(&["everywhere"])
            .unwrap()
            .warning(
                "Event {i} seen by {who}",
                &Context::new().with("i", i).with("who", "everyone"),
            )
            .unwrap();
    }

    let error = std::io::Error::other("connection reset");
    manager
        .channel("audit")
        .unwrap()
        .error("Sync failed", &Context::new().with_exception(&error))
        .unwrap();

    println!("\n--- {path} ---");
    print!("{}", std::fs::read_to_string(path).unwrap());
}
