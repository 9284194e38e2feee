//! Send two labelled profiles over a TCP loopback connection and print them back.
//!
//! Run with:
//!   cargo run --example profile-roundtrip

use std::thread;

use scanwire::codec::{Point, Profile};
use scanwire::frame::{ChannelConfig, ProfileReceiver, ProfileSender};
use scanwire::transport::{connect, Endpoint, Listener};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let listener = Listener::bind(&Endpoint::parse("tcp://127.0.0.1:0")?)?;
    let endpoint = listener.local_endpoint()?;
    eprintln!("Listening on {endpoint}");

    let config = ChannelConfig::default();
    let server_config = config.clone();
    let server = thread::spawn(move || -> Result<Vec<Profile>, scanwire::frame::FrameError> {
        let stream = listener.accept()?;
        let mut receiver = ProfileReceiver::new(stream, &server_config);
        (0..2).map(|_| receiver.recv()).collect()
    });

    let mut sender = ProfileSender::new(connect(&endpoint)?, &config);
    sender.send(&Profile::new(
        "Flange",
        vec![Point::new(0.0, 1.0), Point::new(0.5, 1.25)],
    ))?;
    sender.send(&Profile::new(
        "Tread",
        vec![Point::new(0.0, 0.0), Point::new(0.5, 0.1), Point::new(1.0, 0.4)],
    ))?;

    let received = server.join().map_err(|_| "server thread panicked")??;
    for profile in received {
        eprintln!("{}: {:?}", profile.label, profile.points);
    }
    Ok(())
}
