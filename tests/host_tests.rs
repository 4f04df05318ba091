//! Tests for host classification, canonical forms and IP accessors.

use urihost::*;

#[test]
fn test_valid_hosts() {
    // (input, domain, ip, ipv4, ipv6, ipfuture, version, uri component, ip, unicode)
    let test_cases = vec![
        ("127.0.0.1", false, true, true, false, false, Some("4"), "127.0.0.1", Some("127.0.0.1"), Some("127.0.0.1")),
        ("[::1]", false, true, false, true, false, Some("6"), "[::1]", Some("::1"), Some("[::1]")),
        (
            "[fe80:1234::%251]",
            false,
            true,
            false,
            true,
            false,
            Some("6"),
            "[fe80:1234::%251]",
            Some("fe80:1234::%1"),
            Some("[fe80:1234::%251]"),
        ),
        ("[v1.ZZ.ZZ]", false, true, false, false, true, Some("1"), "[v1.ZZ.ZZ]", Some("ZZ.ZZ"), Some("[v1.ZZ.ZZ]")),
        ("Master.EXAMPLE.cOm", true, false, false, false, false, None, "master.example.com", None, Some("master.example.com")),
        ("", false, false, false, false, false, None, "", None, Some("")),
        ("example.com.", true, false, false, false, false, None, "example.com.", None, Some("example.com.")),
        ("23.42c.two", true, false, false, false, false, None, "23.42c.two", None, Some("23.42c.two")),
        ("98.3.2", true, false, false, false, false, None, "98.3.2", None, Some("98.3.2")),
        ("toto.127.0.0.1", true, false, false, false, false, None, "toto.127.0.0.1", None, Some("toto.127.0.0.1")),
        ("مثال.إختبار", true, false, false, false, false, None, "xn--mgbh0fb.xn--kgbechtv", None, Some("مثال.إختبار")),
        ("xn--mgbh0fb.xn--kgbechtv", true, false, false, false, false, None, "xn--mgbh0fb.xn--kgbechtv", None, Some("مثال.إختبار")),
        ("test..example.com", false, false, false, false, false, None, "test..example.com", None, Some("test..example.com")),
    ];

    for (input, domain, ip, ipv4, ipv6, ipfuture, version, uri, bare_ip, unicode) in test_cases {
        let host = Host::parse(input).unwrap();
        assert_eq!(host.is_domain(), domain, "is_domain mismatch for: {}", input);
        assert_eq!(host.is_ip(), ip, "is_ip mismatch for: {}", input);
        assert_eq!(host.is_ipv4(), ipv4, "is_ipv4 mismatch for: {}", input);
        assert_eq!(host.is_ipv6(), ipv6, "is_ipv6 mismatch for: {}", input);
        assert_eq!(host.is_ip_future(), ipfuture, "is_ip_future mismatch for: {}", input);
        assert_eq!(host.ip_version(), version, "ip_version mismatch for: {}", input);
        assert_eq!(host.uri_component(), uri, "uri component mismatch for: {}", input);
        assert_eq!(host.ip().as_deref(), bare_ip, "ip mismatch for: {}", input);
        assert_eq!(host.content(Encoding::Unicode), unicode, "unicode mismatch for: {}", input);
    }
}

#[test]
fn test_null_host() {
    let host = Host::new(None).unwrap();
    assert!(host.is_null());
    assert!(host.is_empty());
    assert!(!host.is_domain());
    assert!(!host.is_ip());
    assert_eq!(host.category(), Category::Null);
    assert_eq!(host.uri_component(), "");
    assert_eq!(host.content(Encoding::Ascii), None);
    assert_eq!(host.content(Encoding::Unicode), None);
    assert_eq!(host.ip(), None);
    assert_eq!(host.ip_version(), None);
    assert_eq!(host, Host::null());
}

#[test]
fn test_invalid_hosts() {
    let invalid_hosts = vec![
        "tot.    .coucou.com",
        "re view",
        "[127.0.0.1]",
        "[[::1]]",
        "[::1",
        "::1",
        "fe80:1234::%251",
        "[fe80:1234::%25%23]",
        "example. com",
        "examp\0le.com",
        "[127.2.0.1%253]",
        "[ab23::1234%251]",
        "[fe80::1234%25?@]",
        "[fe80::1234%25€]",
        "[fe80::%25]",
        "[v4.1.2.3]",
        "[v06.::1]",
        "_b%C3%A9bé.be-",
    ];

    for input in invalid_hosts {
        let result = Host::parse(input);
        assert!(
            matches!(result, Err(HostError::Syntax { .. })),
            "Should reject with a syntax error: {:?}",
            input
        );
    }
}

#[test]
fn test_registered_names_accepted() {
    let test_cases = vec![
        (".example.com", ".example.com"),
        ("host.com-", "host.com-"),
        (".......", "......."),
        ("_bad.HOST.com", "_bad.host.com"),
        ("b%C3%A9b%C3%A9.be", "b%C3%A9b%C3%A9.be"),
    ];

    for (input, expected) in test_cases {
        let host = Host::parse(input).unwrap();
        assert_eq!(host.category(), Category::RegisteredName, "Wrong category for: {}", input);
        assert_eq!(host.to_string(), expected, "Wrong content for: {}", input);
    }
}

#[test]
fn test_error_carries_input_and_rule() {
    let err = Host::parse("re view").unwrap_err();
    assert_eq!(err.rule(), Some(Rule::RegisteredName));
    assert!(err.to_string().contains("`re view`"), "Message should quote the input: {}", err);

    let err = Host::parse("[ab23::1234%251]").unwrap_err();
    assert_eq!(err.rule(), Some(Rule::ZoneId));
}

#[test]
fn test_is_absolute() {
    let test_cases = vec![
        ("127.0.0.1", false),
        ("example.com.", true),
        ("example.com", false),
        ("", false),
    ];

    for (input, expected) in test_cases {
        assert_eq!(Host::parse(input).unwrap().is_absolute(), expected, "is_absolute mismatch for: {}", input);
    }
}

#[test]
fn test_encoding_selector() {
    let host = Host::parse("рф.ru").unwrap();

    let selectors = vec![("ascii", "xn--p1ai.ru"), ("RFC3986", "xn--p1ai.ru"), ("unicode", "рф.ru"), ("rfc3987", "рф.ru"), ("raw", "xn--p1ai.ru")];
    for (name, expected) in selectors {
        let encoding: Encoding = name.parse().unwrap();
        assert_eq!(host.content(encoding), Some(expected), "Wrong content for selector: {}", name);
    }

    assert_eq!(host.content(Encoding::default()), Some("xn--p1ai.ru"));
    assert!(matches!("-1".parse::<Encoding>(), Err(HostError::UnknownEncoding(_))));
    assert!(matches!(Encoding::try_from(9u8), Err(HostError::UnknownEncoding(_))));
}

#[test]
fn test_with_content() {
    let host = Host::parse("uri.thephpleague.com").unwrap();
    let same = host.with_content(Some("uri.thephpleague.com")).unwrap();
    assert!(Host::same_instance(&host, &same));

    let component = Host::parse("yolo").unwrap();
    assert!(!component.is_null());
    assert!(component.with_content(None).unwrap().is_null());
    assert!(component.with_content(None).unwrap().is_empty());
    assert!(component.with_content(Some("")).unwrap().is_empty());
}

#[test]
fn test_create_from_ip() {
    let test_cases = vec![
        ("127.0.0.1", None, "127.0.0.1"),
        ("::1", None, "[::1]"),
        ("fe80:1234::%1", None, "[fe80:1234::%251]"),
        ("vAF.csucj.$&+;::", None, "[vAF.csucj.$&+;::]"),
        ("csucj.$&+;::", Some("AF"), "[vAF.csucj.$&+;::]"),
    ];

    for (input, version, expected) in test_cases {
        let host = Host::create_from_ip(input, version).unwrap();
        assert_eq!(host.to_string(), expected, "create_from_ip failed for: {}", input);
        assert!(host.is_ip(), "Should be an IP host: {}", input);
    }
}

#[test]
fn test_create_from_ip_failed() {
    let invalid = vec!["127.0.0", "example.com", "vAF.csucj.$&+;:/:", "v4.1.2.3"];

    for input in invalid {
        assert!(Host::create_from_ip(input, None).is_err(), "Should reject: {}", input);
    }
}

#[test]
fn test_zone_identifier() {
    let has_zone = vec![
        ("127.0.0.1", false),
        ("www.example.com", false),
        ("[::1]", false),
        ("[fe80::%251]", true),
        ("[fe80::%1]", true),
    ];

    for (input, expected) in has_zone {
        assert_eq!(Host::parse(input).unwrap().has_zone_identifier(), expected, "Zone check failed for: {}", input);
    }

    let without_zone = vec![
        ("example.com", "example.com"),
        ("127.0.0.1", "127.0.0.1"),
        ("[::1]", "[::1]"),
        ("[fe80::%251]", "[fe80::]"),
        ("[fe80::%1]", "[fe80::]"),
    ];

    for (input, expected) in without_zone {
        let host = Host::parse(input).unwrap();
        assert_eq!(host.without_zone_identifier().unwrap().to_string(), expected, "Zone removal failed for: {}", input);
    }
}

#[test]
fn test_ipv6_canonical_text() {
    let test_cases = vec![
        ("[2001:DB8:0:0:0:0:0:1]", "[2001:db8::1]"),
        ("[0:0:0:0:0:0:0:0]", "[::]"),
        ("[FE80::%25eth0]", "[fe80::%25eth0]"),
    ];

    for (input, expected) in test_cases {
        assert_eq!(Host::parse(input).unwrap().to_string(), expected, "Wrong canonical text for: {}", input);
    }
}

#[test]
fn test_equality_is_canonical() {
    assert_eq!(Host::parse("EXAMPLE.com").unwrap(), Host::parse("example.COM").unwrap());
    assert_eq!(Host::parse("рф.ru").unwrap(), Host::parse("xn--p1ai.ru").unwrap());
    assert_ne!(Host::parse("example.com").unwrap(), Host::parse("example.com.").unwrap());
    assert_ne!(Host::null(), Host::empty());
}

#[test]
fn test_display_and_from_str() {
    let host: Host = "Shop.Example.COM".parse().unwrap();
    assert_eq!(host.to_string(), "shop.example.com");
    assert_eq!(format!("{}", Host::null()), "");
    assert!("re view".parse::<Host>().is_err());
}

#[test]
fn test_from_url() {
    let test_cases = vec![
        ("https://Docs.RS/urihost/latest/", Some("docs.rs")),
        ("http://127.0.0.1:8080/", Some("127.0.0.1")),
        ("http://[::1]/", Some("[::1]")),
        ("https://xn--p1ai.ru/", Some("xn--p1ai.ru")),
        ("mailto:someone@example.com", None),
    ];

    for (input, expected) in test_cases {
        let url = url::Url::parse(input).unwrap();
        let host = Host::from_url(&url).unwrap();
        assert_eq!(host.content(Encoding::Ascii), expected, "Wrong host for URL: {}", input);
    }
}

#[test]
fn test_hosts_are_shareable_across_threads() {
    let host = Host::parse("uri.thephpleague.com").unwrap();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let host = host.clone();
            std::thread::spawn(move || host.content(Encoding::Unicode).map(str::to_string))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().as_deref(), Some("uri.thephpleague.com"));
    }
}
