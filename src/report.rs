//! Human and machine readable rendering of a decoded reply.
//!
//! Provides the per-field summary printed by the `sntp` binary in text or JSON form.

use crate::{
    calendar::CalendarDate,
    packets::NtpPacket,
    status::{LeapIndicator, Mode},
    stratum::StratumClass,
    timestamp::{TimeOfDay, Timestamp},
};

/// Output format for reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output for machine consumption.
    Json,
}

/// Decoded view of one timestamp field.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TimestampReport {
    pub raw: u64,
    pub time_of_day: TimeOfDay,
    pub millis: f64,
    /// `None` when the date is past the supported range.
    pub date: Option<CalendarDate>,
}

impl TimestampReport {
    pub fn new(ts: Timestamp) -> Self {
        let date = match ts.date() {
            Ok(date) => Some(date),
            Err(e) => {
                log::warn!("Cannot decode date of timestamp {:#018x}: {}", ts.raw(), e);
                None
            }
        };

        TimestampReport {
            raw: ts.raw(),
            time_of_day: ts.time_of_day(),
            millis: ts.millis_after_second(),
            date,
        }
    }

    /// `HH:MM:SS.mmm DD/MM/YYYY`, with `??/??/????` for an unsupported date.
    pub fn display(&self) -> String {
        let date = self
            .date
            .map_or_else(|| "??/??/????".to_string(), |d| d.to_string());
        format!("{}.{:03.0} {}", self.time_of_day, self.millis.floor(), date)
    }
}

/// Serializable summary of a decoded reply.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PacketReport {
    pub received_bytes: usize,
    pub leap_indicator: LeapIndicator,
    pub version: u8,
    pub mode: Mode,
    pub stratum: u8,
    pub stratum_class: StratumClass,
    pub poll: u8,
    pub precision: i8,
    pub root_delay_raw: i32,
    pub root_delay_ms: f64,
    pub root_dispersion_raw: u32,
    pub root_dispersion_ms: f64,
    pub reference_id: String,
    pub reference_timestamp: TimestampReport,
    pub originate_timestamp: TimestampReport,
    pub receive_timestamp: TimestampReport,
    pub transmit_timestamp: TimestampReport,
}

impl PacketReport {
    /// Builds the report of a reply that arrived in a datagram of `received_bytes`.
    pub fn from_packet(packet: &NtpPacket, received_bytes: usize) -> Self {
        PacketReport {
            received_bytes,
            leap_indicator: packet.status.leap_indicator,
            version: packet.status.version,
            mode: packet.status.mode,
            stratum: packet.stratum,
            stratum_class: packet.stratum_class(),
            poll: packet.poll,
            precision: packet.precision,
            root_delay_raw: packet.root_delay.raw(),
            root_delay_ms: packet.root_delay.as_millis_f64(),
            root_dispersion_raw: packet.root_dispersion.raw(),
            root_dispersion_ms: packet.root_dispersion.as_millis_f64(),
            reference_id: packet.reference_id.as_ascii(),
            reference_timestamp: TimestampReport::new(packet.reference_timestamp),
            originate_timestamp: TimestampReport::new(packet.originate_timestamp),
            receive_timestamp: TimestampReport::new(packet.receive_timestamp),
            transmit_timestamp: TimestampReport::new(packet.transmit_timestamp),
        }
    }

    /// Prints the report in the given format.
    pub fn print(&self, format: OutputFormat) {
        match format {
            OutputFormat::Text => print!("{}", self.to_text()),
            OutputFormat::Json => {
                if let Ok(json) = serde_json::to_string(self) {
                    println!("{}", json);
                }
            }
        }
    }

    pub fn to_text(&self) -> String {
        let lines = [
            format!("RECEIVED\t\t= {} bytes", self.received_bytes),
            format!(
                "LI\t\t\t= {} ({})",
                self.leap_indicator as u8, self.leap_indicator
            ),
            format!("VN\t\t\t= {}", self.version),
            format!("MODE\t\t\t= {} ({})", self.mode as u8, self.mode),
            format!("STRATUM\t\t\t= {}", self.stratum_class),
            format!("POLL INTERVAL\t\t= {}", self.poll),
            format!("PRECISION\t\t= {}", self.precision),
            format!(
                "ROOT DELAY\t\t= {} ({:.3} ms)",
                self.root_delay_raw, self.root_delay_ms
            ),
            format!(
                "ROOT DISPERSION\t\t= {} ({:.3} ms)",
                self.root_dispersion_raw, self.root_dispersion_ms
            ),
            format!("REF ID\t\t\t= {}", self.reference_id),
            format!(
                "REFERENCE TIMESTAMP\t= {}",
                self.reference_timestamp.display()
            ),
            format!(
                "ORIGINATE TIMESTAMP\t= {}",
                self.originate_timestamp.display()
            ),
            format!("RECEIVE TIMESTAMP\t= {}", self.receive_timestamp.display()),
            format!(
                "TRANSMIT TIMESTAMP\t= {}",
                self.transmit_timestamp.display()
            ),
        ];

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}
