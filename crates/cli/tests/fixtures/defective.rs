pub fn parse_port(raw: &str) -> u16 {
    let port = raw.trim();
    let port = port.parse::<u16>().unwrap();
    port
}

pub fn silenced() -> u16 {
    // lintsift-ignore: unwrap-used
    let port = "80".parse::<u16>().unwrap();
    port
}
