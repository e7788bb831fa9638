#[macro_use]
extern crate log;

use std::process::ExitCode;

use sntp_header::client::{query, resolve};
use sntp_header::configuration::*;
use sntp_header::report::PacketReport;
use sntp_header::stratum::StratumClass;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let conf = Configuration::parse();
    if let Err(e) = conf.validate() {
        eprintln!("Configuration is broken: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Configuration valid. Querying {}:{}", conf.host, conf.port);

    let server = match resolve(&conf.host, conf.port).await {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let reply = match query(server, conf.timeout()).await {
        Ok(reply) => reply,
        Err(e) => {
            eprintln!("Query to {} failed: {}", server, e);
            return ExitCode::FAILURE;
        }
    };

    if reply.packet.stratum_class() == StratumClass::KissOfDeath {
        warn!(
            "Server {} sent kiss code {}",
            reply.source, reply.packet.reference_id
        );
    }

    PacketReport::from_packet(&reply.packet, reply.received_bytes).print(conf.output_format);

    ExitCode::SUCCESS
}
