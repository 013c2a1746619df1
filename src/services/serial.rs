/// Serial port probe
/// Lists the ports the robot may be attached to. Enumeration failures never stop the app.

use crate::error::Result;
use serialport::{SerialPortInfo, SerialPortType};

pub fn available_ports() -> Result<Vec<String>> {
    let ports = serialport::available_ports()?;
    Ok(port_names(ports))
}

fn port_names(ports: Vec<SerialPortInfo>) -> Vec<String> {
    ports.into_iter().map(|p| p.port_name).collect()
}

fn describe(port: &SerialPortInfo) -> String {
    match &port.port_type {
        SerialPortType::UsbPort(usb) => format!(
            "{} (USB {:04x}:{:04x}{})",
            port.port_name,
            usb.vid,
            usb.pid,
            usb.product.as_deref().map(|p| format!(" {}", p)).unwrap_or_default()
        ),
        SerialPortType::BluetoothPort => format!("{} (Bluetooth)", port.port_name),
        SerialPortType::PciPort | SerialPortType::Unknown => port.port_name.clone(),
    }
}

/// Log detected ports once at startup.
pub fn log_ports() {
    match serialport::available_ports() {
        Ok(ports) => {
            log::info!("[Serial] Detected {} port(s)", ports.len());
            for port in &ports {
                log::info!("[Serial]   {}", describe(port));
            }
        }
        Err(e) => log::error!("[Serial] Failed to list ports: {}", e),
    }
}
