//! End-to-end tests over the analyzer entry points.

use compose_lens::analyzer::{
    CommandValue, Severity, analyze_overview, analyze_structure, validate,
};

#[test]
fn test_minimal_service_with_latest_tag() {
    let yaml = "services:\n  web:\n    image: nginx:latest\n";

    let structure = analyze_structure(yaml);
    assert_eq!(structure.services.len(), 1);
    assert_eq!(structure.services[0].name, "web");
    assert_eq!(structure.services[0].image.as_deref(), Some("nginx:latest"));

    let report = validate(yaml);
    let codes: Vec<_> = report.codes().collect();
    assert!(codes.contains(&"compose-latest-tag"));
    assert!(codes.contains(&"service-missing-restart"));
    assert!(codes.contains(&"service-missing-volumes"));
    assert!(codes.contains(&"compose-missing-healthcheck"));
    assert!(codes.contains(&"compose-missing-networks"));
    assert!(codes.contains(&"compose-missing-volumes"));

    // Advisory findings only; the document is still valid.
    assert!(report.is_valid);
    assert_eq!(report.error_count, 0);
    assert_eq!(report.warning_count, 1);
}

#[test]
fn test_empty_document() {
    let overview = analyze_overview("");
    assert_eq!(overview.services_count, 0);
    assert_eq!(overview.networks_count, 0);
    assert_eq!(overview.volumes_count, 0);

    let structure = analyze_structure("");
    assert!(structure.services.is_empty());
    assert!(structure.networks.is_empty());
    assert!(structure.volumes.is_empty());

    let report = validate("");
    assert!(!report.is_valid);
    let missing: Vec<_> = report
        .issues
        .iter()
        .filter(|i| i.code == "compose-missing-services")
        .collect();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].severity, Severity::Error);
    assert_eq!(missing[0].line, Some(1));
}

#[test]
fn test_duplicate_service_name() {
    let yaml = "services:\n  web:\n    image: nginx:1.25\n  web:\n    image: httpd:2.4\n";
    let report = validate(yaml);

    let dups: Vec<_> = report
        .issues
        .iter()
        .filter(|i| i.code == "yaml-duplicate-key")
        .collect();
    assert_eq!(dups.len(), 1);
    assert_eq!(dups[0].severity, Severity::Error);
    // Reported at the second occurrence.
    assert_eq!(dups[0].line, Some(4));
    assert!(dups[0].message.contains("web"));
}

#[test]
fn test_duplicate_host_port() {
    let yaml = "services:\n  app:\n    image: busybox:1\n    ports:\n      - \"8080:80\"\n      - \"8080:90\"\n";
    let report = validate(yaml);
    let codes: Vec<_> = report.codes().collect();

    assert!(codes.contains(&"service-duplicate-port"));
    assert!(!codes.contains(&"service-common-port"));
    assert!(!report.is_valid);
}

#[test]
fn test_well_known_host_port() {
    let yaml = "services:\n  app:\n    image: busybox:1\n    ports:\n      - \"443:8443\"\n";
    let report = validate(yaml);

    let common: Vec<_> = report
        .issues
        .iter()
        .filter(|i| i.code == "service-common-port")
        .collect();
    assert_eq!(common.len(), 1);
    assert_eq!(common[0].severity, Severity::Info);
    assert!(common[0].message.contains("443"));
    assert!(common[0].message.contains("HTTPS"));
}

#[test]
fn test_unused_and_undefined_volumes() {
    let yaml = "services:\n  app:\n    image: busybox:1\n    volumes:\n      - orphan:/data\nvolumes:\n  cache:\n";
    let report = validate(yaml);

    let unused: Vec<_> = report
        .issues
        .iter()
        .filter(|i| i.code == "compose-unused-volume")
        .collect();
    assert_eq!(unused.len(), 1);
    assert_eq!(unused[0].severity, Severity::Warning);
    assert!(unused[0].message.contains("cache"));

    let undefined: Vec<_> = report
        .issues
        .iter()
        .filter(|i| i.code == "compose-undefined-volume")
        .collect();
    assert_eq!(undefined.len(), 1);
    assert_eq!(undefined[0].severity, Severity::Error);
    assert!(undefined[0].message.contains("orphan"));
}

#[test]
fn test_counter_and_parser_agree_on_well_formed_input() {
    let yaml = "services:\n  web:\n    image: nginx:1.25\n  db:\n    image: postgres:16\n  cache:\n    image: redis:7\nnetworks:\n  front:\n  back:\nvolumes:\n  data:\n";

    let overview = analyze_overview(yaml);
    let structure = analyze_structure(yaml);

    assert_eq!(overview.services_count, 3);
    assert_eq!(overview.services_count, structure.services.len());
    assert_eq!(overview.networks_count, structure.networks.len());
    assert_eq!(overview.volumes_count, structure.volumes.len());
}

#[test]
fn test_full_document_roundtrip() {
    let yaml = "services:\n  web:\n    image: nginx:1.25\n    restart: unless-stopped\n    command: nginx -g 'daemon off;'\n    ports:\n      - \"8088:80\"\n    environment:\n      - MODE=production\n      - DEBUG\n    volumes:\n      - ./conf:/etc/nginx\n      - data:/var/cache\n    depends_on:\n      - db\n    networks:\n      app_net:\n        ipv4_address: 172.28.0.10\n  db:\n    image: postgres:16\n    restart: always\n    environment:\n      - POSTGRES_PASSWORD=secret\nnetworks:\n  app_net:\n    driver: bridge\nvolumes:\n  data:\n";

    let structure = analyze_structure(yaml);
    assert_eq!(structure.services.len(), 2);

    let web = &structure.services[0];
    assert_eq!(web.name, "web");
    assert_eq!(web.restart.as_deref(), Some("unless-stopped"));
    assert_eq!(
        web.command,
        Some(CommandValue::Scalar("nginx -g 'daemon off;'".into()))
    );
    assert_eq!(web.ports.len(), 1);
    assert_eq!(web.ports[0].host, "8088");
    assert_eq!(web.environment.len(), 2);
    assert_eq!(web.environment[1].value, None);
    assert_eq!(web.volumes.len(), 2);
    assert_eq!(web.depends_on, vec!["db".to_string()]);
    assert_eq!(web.networks.len(), 1);
    assert_eq!(web.networks[0].ip.as_deref(), Some("172.28.0.10"));

    assert_eq!(structure.networks.len(), 1);
    assert_eq!(structure.networks[0].driver.as_deref(), Some("bridge"));
    assert_eq!(structure.volumes, vec!["data".to_string()]);
}

#[test]
fn test_issues_are_sorted_by_severity_then_line() {
    let yaml = "services:\n  web:\n    image: nginx:latest\n    ports:\n      - \"8080:80\"\n      - \"8080:81\"\n  web:\n    image: httpd:2.4\n";
    let report = validate(yaml);

    let mut last = (0u8, 0u32);
    for issue in &report.issues {
        let key = (issue.severity.priority(), issue.line.unwrap_or(u32::MAX));
        assert!(key >= last, "{key:?} sorted after {last:?}");
        last = key;
    }
}

#[test]
fn test_never_panics_on_arbitrary_text() {
    let inputs = [
        "",
        "\n\n\n",
        ":",
        "::::",
        "- - - -",
        "\tservices:\n\t\tweb:",
        "services:",
        "services:\n  -\n",
        "key without colon maybe\n",
        "services: networks: volumes:\n",
        "\u{feff}services:\n  web:\n",
        "a\u{0}b\nc\u{1}d\n",
    ];
    for input in inputs {
        let _ = analyze_overview(input);
        let _ = analyze_structure(input);
        let report = validate(input);
        assert_eq!(
            report.issues.len(),
            report.error_count + report.warning_count + report.info_count
        );
    }
}

#[test]
fn test_analysis_is_idempotent() {
    let yaml = "services:\n  web:\n    image: nginx:latest\n    ports:\n      - \"443:443\"\n";
    assert_eq!(analyze_overview(yaml), analyze_overview(yaml));
    assert_eq!(analyze_structure(yaml), analyze_structure(yaml));
    assert_eq!(validate(yaml), validate(yaml));
}
