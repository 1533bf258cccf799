use clap::Args;
use num_traits::ToPrimitive;
use sensorlink::{BaudRate, Error};
use simple_eyre::{eyre::eyre, Result};
use std::time::Duration;
use tokio_serial::{SerialPortBuilderExt, SerialStream};

#[derive(Args)]
pub struct SerialConf {
    /// Name of serial port that should be used; auto-detected when exactly
    /// one device is connected
    #[clap(short, long, value_parser)]
    pub serial: Option<String>,

    /// Serial port baud rate
    #[clap(short, long, value_parser = parse_baud_rate, default_value_t)]
    pub baud_rate: BaudRate,
}

fn parse_baud_rate(s: &str) -> Result<BaudRate, Error> {
    s.parse()
        .or(Err(Error::InvalidBaudRate))
        .and_then(BaudRate::try_from_rate)
}

impl SerialConf {
    /// Picks a channel candidate. `Ok(None)` means no device is connected;
    /// more than one device without an explicit `--serial` is an error that
    /// lists the choices.
    pub fn discover(&self) -> Result<Option<String>> {
        if let Some(name) = &self.serial {
            return Ok(Some(name.clone()));
        }
        let ports = tokio_serial::available_ports()?;
        match ports.as_slice() {
            [] => Ok(None),
            [port] => {
                log::info!("auto-detected serial port {}", port.port_name);
                Ok(Some(port.port_name.clone()))
            }
            _ => {
                let names: Vec<_> = ports.iter().map(|p| p.port_name.clone()).collect();
                Err(eyre!(
                    "Multiple serial ports found, choose one with --serial: {}",
                    names.join(", ")
                ))
            }
        }
    }

    /// Polls the platform until a channel candidate actually shows up in the
    /// port listing
    pub async fn wait_for_port(&self) -> Result<String> {
        let mut poll = tokio::time::interval(Duration::from_millis(500));
        loop {
            poll.tick().await;
            let ports = tokio_serial::available_ports()?;
            match &self.serial {
                Some(name) if ports.iter().any(|p| &p.port_name == name) => {
                    return Ok(name.clone());
                }
                Some(_) => continue,
                None => {
                    if let [port] = ports.as_slice() {
                        return Ok(port.port_name.clone());
                    }
                }
            }
        }
    }

    pub fn open(&self, path: &str) -> Result<SerialStream> {
        tokio_serial::new(path, ToPrimitive::to_u32(&self.baud_rate).unwrap())
            .open_native_async()
            .map_err(|_| eyre!("Could not open serial port {path}"))
    }
}
