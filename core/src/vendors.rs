use std::sync::OnceLock;

use mac_oui::Oui;
use pnet::util::MacAddr;
use tracing::warn;

use presence_common::vendors::VendorRepository;

static OUI_DB: OnceLock<Option<Oui>> = OnceLock::new();

fn oui_db() -> Option<&'static Oui> {
    OUI_DB
        .get_or_init(|| match Oui::default() {
            Ok(db) => Some(db),
            Err(e) => {
                warn!("OUI database unavailable, vendor names disabled: {e}");
                None
            }
        })
        .as_ref()
}

/// Vendor lookup backed by the OUI table bundled with `mac_oui`.
pub struct OuiVendors;

impl VendorRepository for OuiVendors {
    fn get_vendor(&self, mac: MacAddr) -> Option<String> {
        let db = oui_db()?;
        match db.lookup_by_mac(&mac.to_string()) {
            Ok(Some(entry)) => Some(entry.company_name.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locally_administered_address_has_no_vendor() {
        let mac = MacAddr::new(0x02, 0x00, 0x00, 0x00, 0x00, 0x01);
        assert_eq!(OuiVendors.get_vendor(mac), None);
    }
}
