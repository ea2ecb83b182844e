use tagmatch::Router;

macro_rules! match_tests {
    ($($name:ident {
        routes = $routes:expr,
        $( $metric:literal => $measurement:literal
            { $( $key:literal => $val:literal ),* $(,)? } ),* $(,)?
    }),* $(,)?) => { $(
        #[test]
        fn $name() {
            let router = Router::new(&$routes.join("\n")).unwrap();
            router.check_tree().unwrap();

            $(
                let (measurement, tags) = router.route($metric);
                assert_eq!(
                    measurement, $measurement,
                    "wrong measurement for '{}'", $metric
                );

                // `Tags` iterates sorted by key.
                let expected = vec![$(($key, $val)),*];
                let got = tags.iter().collect::<Vec<_>>();
                assert_eq!(got, expected, "wrong tags for '{}'", $metric);
            )*
        }
    )* };
}

match_tests! {
    catch_all {
        routes = ["servers.* .host.measurement*"],
        "uptime" => "uptime" {},
        "some.other.namespace" => "some.other.namespace" {},
        "servers.web01.cpu.load" => "cpu.load" { "host" => "web01" },
    },
    exact_beats_wildcard {
        routes = [
            "servers.* .wrong.measurement*",
            "servers.localhost .host.measurement*",
        ],
        "servers.localhost.cpu.load" => "cpu.load" { "host" => "localhost" },
        "servers.web01.cpu.load" => "cpu.load" { "wrong" => "web01" },
    },
    depth_precedence {
        routes = [
            "*.* measurement* rule=top",
            "servers.* measurement* rule=servers-wild",
            "servers.localhost measurement* rule=localhost",
            "servers.localhost.cpu ...measurement* rule=cpu",
        ],
        "servers.localhost.cpu.load" => "load" { "rule" => "cpu" },
        "servers.localhost.mem" => "servers.localhost.mem" { "rule" => "localhost" },
        "servers.web01.cpu" => "servers.web01.cpu" { "rule" => "servers-wild" },
        "prod.web01.cpu" => "prod.web01.cpu" { "rule" => "top" },
    },
    shorter_pattern_matches_longer_name {
        routes = ["servers measurement rule=short"],
        "servers.web01.cpu" => "servers" { "rule" => "short" },
        "servers" => "servers" { "rule" => "short" },
    },
    wildcard_path_below_root {
        routes = [
            "influxd.*.foo measurement.tool.measurement*",
            "prod.*.mem .host.measurement*",
        ],
        "influxd.v2.foo.queries" => "influxd.foo.queries" { "tool" => "v2" },
        "prod.web01.mem.used" => "mem.used" { "host" => "web01" },
    },
}

// Pins child ordering (lexicographic, wildcard last), path-node creation,
// and the catch-all landing on the root's existing wildcard child.
#[test]
fn tree_shape() {
    let router = Router::new(
        "*.* .wrong.measurement*
         servers.* .host.measurement*
         servers.localhost .host.measurement*
         *.localhost .host.measurement*
         *.*.cpu .host.measurement*
         a.b.c .host.measurement*
         influxd.*.foo .host.measurement*
         prod.*.mem .host.measurement*",
    )
    .unwrap();

    router.check_tree().unwrap();

    let expected = "\
a
  b
    c .host.measurement*
influxd
  *
    foo .host.measurement*
prod
  *
    mem .host.measurement*
servers
  localhost .host.measurement*
  * .host.measurement*
* measurement*
  localhost .host.measurement*
  * .wrong.measurement*
    cpu .host.measurement*
";
    assert_eq!(router.render_tree(), expected);
}

#[test]
fn route_is_deterministic() {
    let router = Router::new(
        "servers.* .host.measurement*
         prod.*.cpu env.host.measurement",
    )
    .unwrap();

    let first = router.route("servers.web01.cpu.load");
    for _ in 0..3 {
        assert_eq!(router.route("servers.web01.cpu.load"), first);
    }
}

// A name that runs out inside a partially covered branch finds no rule:
// the exact child is committed to at each level, and a dead end there does
// not retry the catch-all. The router degrades to the unmodified name.
#[test]
fn dead_end_returns_name_unmodified() {
    let router = Router::new("servers.localhost.cpu measurement*").unwrap();

    let (measurement, tags) = router.route("servers.localhost");
    assert_eq!(measurement, "servers.localhost");
    assert!(tags.is_empty());
}

#[test]
fn shared_across_threads() {
    let router = std::sync::Arc::new(
        Router::new("servers.* .host.measurement*").unwrap(),
    );

    let handles = (0..4)
        .map(|_| {
            let router = router.clone();
            std::thread::spawn(move || router.route("servers.web01.cpu"))
        })
        .collect::<Vec<_>>();

    for handle in handles {
        let (measurement, tags) = handle.join().unwrap();
        assert_eq!(measurement, "cpu");
        assert_eq!(tags.get("host"), Some("web01"));
    }
}
