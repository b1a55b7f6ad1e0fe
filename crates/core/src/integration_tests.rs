//! Integration tests: exercise the full flow against a recording transport.
//!
//! Each test resolves a device kind from its HID identity, builds or loads a
//! profile, encodes it (optionally as a patch against the previous state),
//! and checks the exact reports that reach the device.

#[cfg(test)]
mod tests {
    use crate::device::{DeviceKind, RIVAL100_HID_ID, RIVAL_HID_ID};
    use crate::error::Error;
    use crate::profile::Profile;
    use crate::transport::apply_commands;
    use crate::transport::mock::MockTransport;

    /// Open-time variant selection followed by a full factory reset.
    #[test]
    fn factory_reset_generic() {
        let kind = DeviceKind::probe(RIVAL_HID_ID).unwrap();
        let mock = MockTransport::new();

        let commands = Profile::factory(kind).to_commands(kind, None);
        apply_commands(&mock, &commands, true).unwrap();

        assert_eq!(
            mock.sent(),
            vec![
                vec![0x08, 0x02, 255, 24, 0],
                vec![0x07, 0x02, 0x02],
                vec![0x08, 0x01, 255, 24, 0],
                vec![0x07, 0x01, 0x02],
                vec![0x03, 0x01, 16],
                vec![0x03, 0x02, 32],
                vec![0x04, 0x00, 0x01],
                vec![0x09],
            ]
        );
    }

    #[test]
    fn factory_reset_second_generation() {
        let kind = DeviceKind::probe(RIVAL100_HID_ID).unwrap();
        let mock = MockTransport::new();

        let commands = Profile::factory(kind).to_commands(kind, None);
        apply_commands(&mock, &commands, false).unwrap();

        let sent = mock.sent();
        assert_eq!(sent.len(), 6);
        assert_eq!(sent[0].len(), 32);
        assert_eq!(&sent[0][..5], &[0x05, 0x00, 255, 24, 0]);
        // 1000 / 50 and 2000 / 50
        assert_eq!(sent[3], vec![0x03, 0x01, 20]);
        assert_eq!(sent[4], vec![0x03, 0x02, 40]);
    }

    /// Loading a YAML profile and applying only what changed since the
    /// factory state: unchanged LED colors must not be re-sent.
    #[test]
    fn load_then_patch_from_factory_state() {
        let kind = DeviceKind::probe(RIVAL_HID_ID).unwrap();
        let factory = Profile::factory(kind);
        let current = factory.to_commands(kind, None);

        let yaml = "\
logo_style: 1
wheel_style: 1
cpi2: 3200
polling_rate: 500
owner: someone
";
        let profile = Profile::from_yaml_str(&factory, yaml).unwrap();
        let patch = profile.to_commands(kind, Some(&current));

        let mock = MockTransport::new();
        apply_commands(&mock, &patch, true).unwrap();
        assert_eq!(
            mock.sent(),
            vec![
                vec![0x07, 0x02, 0x01],
                vec![0x07, 0x01, 0x01],
                vec![0x03, 0x02, 64],
                vec![0x04, 0x00, 0x02],
                vec![0x09],
            ]
        );
    }

    /// A bad value anywhere in the document rejects the whole load and
    /// nothing is written.
    #[test]
    fn invalid_document_writes_nothing() {
        let kind = DeviceKind::probe(RIVAL_HID_ID).unwrap();
        let yaml = "logo_color: red\ncpi1: 6550\n";
        let err = Profile::from_yaml_str(&Profile::factory(kind), yaml).unwrap_err();
        assert!(matches!(err, Error::InvalidField { field: "cpi1", .. }));
        assert!(err.to_string().contains("6550"));
    }

    /// The same profile produces different color reports per variant but
    /// identical style/CPI/rate reports.
    #[test]
    fn variants_share_non_color_reports() {
        let mut profile = Profile::default();
        profile.set_logo_color("dodgerblue").unwrap();
        profile.set_wheel_color("dodgerblue").unwrap();
        profile.set_cpi(1, 1200).unwrap();

        let generic = profile.to_commands(DeviceKind::Generic, None);
        let gen2 = profile.to_commands(DeviceKind::SecondGeneration, None);

        assert_eq!(generic.len(), 7);
        assert_eq!(gen2.len(), 6);
        assert_eq!(&generic[3..], &gen2[2..]);
        assert_eq!(generic[1], gen2[1]);
        assert_eq!(&gen2[0].as_bytes()[2..5], &[0x1E, 0x90, 0xFF]);
    }

    /// Saving and reloading yields a profile whose patch against the
    /// original state is empty.
    #[test]
    fn save_reload_is_a_no_op_patch() {
        let kind = DeviceKind::SecondGeneration;
        let mut profile = Profile::factory(kind);
        profile.set_logo_color("#123456").unwrap();
        profile.set_polling_rate(250).unwrap();

        let yaml = profile.to_yaml().unwrap();
        let reloaded = Profile::from_yaml_str(&Profile::default(), &yaml).unwrap();
        let current = profile.to_commands(kind, None);

        assert!(reloaded.to_commands(kind, Some(&current)).is_empty());
    }

    #[test]
    fn unknown_hardware_is_rejected_before_encoding() {
        let err = DeviceKind::probe("0003:0000046D:0000C08D").unwrap_err();
        assert!(matches!(err, Error::UnsupportedHardware(_)));
    }
}
