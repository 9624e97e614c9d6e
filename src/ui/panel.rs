/// Side panel with navigation and toggles. Only its visibility is state.
#[derive(Debug, Default)]
pub struct SidePanel {
    open: bool,
}

impl SidePanel {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_reports_the_new_state() {
        let mut panel = SidePanel::default();

        assert!(panel.toggle());
        assert!(!panel.toggle());

        panel.toggle();
        panel.close();
        assert!(!panel.is_open());
    }
}
