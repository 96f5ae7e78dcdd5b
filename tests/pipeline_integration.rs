use std::fs;
use subgen::{CliConfig, LocalStorage, SubsEngine, SubscribePipeline};
use tempfile::TempDir;

fn write_inputs(temp: &TempDir, config: &serde_json::Value, domain_map: &serde_json::Value) {
    fs::write(
        temp.path().join("config.json"),
        serde_json::to_vec(config).unwrap(),
    )
    .unwrap();
    fs::write(
        temp.path().join("domain-map.json"),
        serde_json::to_vec(domain_map).unwrap(),
    )
    .unwrap();
}

fn cli_config(temp: &TempDir) -> CliConfig {
    CliConfig {
        config_file: temp.path().join("config.json").to_str().unwrap().to_string(),
        domain_map_file: temp
            .path()
            .join("domain-map.json")
            .to_str()
            .unwrap()
            .to_string(),
        save_dir: temp.path().join("subs").to_str().unwrap().to_string(),
        verbose: false,
        monitor: false,
    }
}

async fn run(temp: &TempDir) -> String {
    let storage = LocalStorage::new(".".to_string());
    let pipeline = SubscribePipeline::new(storage, cli_config(temp));
    let engine = SubsEngine::new(pipeline);
    engine.run().await.unwrap()
}

#[tokio::test]
async fn generates_the_documented_trojan_scenario() {
    let temp = TempDir::new().unwrap();
    write_inputs(
        &temp,
        &serde_json::json!({
            "inbounds": [{
                "tag": "in1",
                "protocol": "trojan",
                "streamSettings": {"network": "ws", "wsSettings": {"path": "/x"}},
                "settings": {"clients": [{"password": "p1", "email": "a@b"}]}
            }]
        }),
        &serde_json::json!({"in1": [{"target": "http://10.0.0.1"}]}),
    );

    run(&temp).await;

    let save_dir = temp.path().join("subs");
    let body = fs::read_to_string(save_dir.join("p1").join("subscribe")).unwrap();
    assert_eq!(body, "trojan://p1@10.0.0.1:80?type=ws&path=%2Fx#in1\n");

    let meta = fs::read_to_string(save_dir.join("meta")).unwrap();
    assert_eq!(meta, "p1:{\"a@b\"}\n");
}

#[tokio::test]
async fn one_inbound_with_three_endpoints_yields_three_links() {
    let temp = TempDir::new().unwrap();
    write_inputs(
        &temp,
        &serde_json::json!({
            "inbounds": [{
                "tag": "in1",
                "protocol": "trojan",
                "streamSettings": {"network": "ws", "wsSettings": {"path": "/x"}},
                "settings": {"clients": [{"password": "p1", "email": "a@b"}]}
            }]
        }),
        &serde_json::json!({"in1": [
            {"target": "http://10.0.0.1"},
            {"target": "http://10.0.0.2"},
            {"target": "https://proxy.example.com"}
        ]}),
    );

    run(&temp).await;

    let body =
        fs::read_to_string(temp.path().join("subs").join("p1").join("subscribe")).unwrap();
    let links: Vec<&str> = body.lines().collect();
    assert_eq!(
        links,
        vec![
            "trojan://p1@10.0.0.1:80?type=ws&path=%2Fx#in1",
            "trojan://p1@10.0.0.2:80?type=ws&path=%2Fx#in1__1",
            "trojan://p1@proxy.example.com:443?type=ws&path=%2Fx&sni=proxy.example.com&security=tls#in1__2",
        ]
    );
}

#[tokio::test]
async fn mixed_protocols_share_one_bundle_per_identity() {
    let temp = TempDir::new().unwrap();
    write_inputs(
        &temp,
        &serde_json::json!({
            "inbounds": [
                {
                    "tag": "t1",
                    "protocol": "trojan",
                    "streamSettings": {"network": "ws"},
                    "settings": {"clients": [{"password": "shared", "email": "a@b"}]}
                },
                {
                    "tag": "skipped",
                    "protocol": "socks",
                    "streamSettings": {"network": "ws"},
                    "settings": {"clients": [{"password": "other", "email": "x@y"}]}
                },
                {
                    "tag": "v1",
                    "protocol": "vmess",
                    "streamSettings": {"network": "grpc", "grpcSettings": {"serviceName": "svc"}},
                    "settings": {"clients": [{"id": "shared", "email": "a@b"}]}
                }
            ]
        }),
        &serde_json::json!({
            "t1": [{"target": "10.0.0.1:8443"}],
            "v1": [{"target": "10.0.0.2"}],
            "skipped": [{"target": "10.0.0.3"}]
        }),
    );

    run(&temp).await;

    let save_dir = temp.path().join("subs");
    let body = fs::read_to_string(save_dir.join("shared").join("subscribe")).unwrap();
    let links: Vec<&str> = body.lines().collect();
    assert_eq!(links.len(), 2);
    assert!(links[0].starts_with("vmess://"));
    assert_eq!(links[1], "trojan://shared@10.0.0.1:8443?type=ws#t1");

    // The socks inbound is filtered, so its client never gets a directory.
    assert!(!save_dir.join("other").exists());

    let meta = fs::read_to_string(save_dir.join("meta")).unwrap();
    assert_eq!(meta, "shared:{\"a@b\"}\n");
}

#[tokio::test]
async fn reruns_are_byte_identical_and_replace_stale_output() {
    let temp = TempDir::new().unwrap();
    write_inputs(
        &temp,
        &serde_json::json!({
            "inbounds": [{
                "tag": "in1",
                "protocol": "vmess",
                "streamSettings": {"network": "ws", "wsSettings": {"path": "/v"}},
                "settings": {"clients": [
                    {"id": "uuid-1", "email": "a@b"},
                    {"id": "uuid-2", "email": "c@d"}
                ]}
            }]
        }),
        &serde_json::json!({"in1": [{"target": "10.1.1.1:8443"}]}),
    );

    let save_dir = temp.path().join("subs");
    fs::create_dir_all(save_dir.join("stale-client")).unwrap();
    fs::write(save_dir.join("stale-client").join("subscribe"), "stale\n").unwrap();

    run(&temp).await;
    let first = fs::read_to_string(save_dir.join("uuid-1").join("subscribe")).unwrap();
    assert!(!save_dir.join("stale-client").exists());

    run(&temp).await;
    let second = fs::read_to_string(save_dir.join("uuid-1").join("subscribe")).unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn unsupported_transport_aborts_the_run() {
    let temp = TempDir::new().unwrap();
    write_inputs(
        &temp,
        &serde_json::json!({
            "inbounds": [{
                "tag": "in1",
                "protocol": "trojan",
                "streamSettings": {"network": "tcp"},
                "settings": {"clients": [{"password": "p1", "email": "a@b"}]}
            }]
        }),
        &serde_json::json!({"in1": [{"target": "http://10.0.0.1"}]}),
    );

    let storage = LocalStorage::new(".".to_string());
    let pipeline = SubscribePipeline::new(storage, cli_config(&temp));
    let engine = SubsEngine::new(pipeline);

    let result = engine.run().await;
    assert!(result.is_err());
    assert!(!temp.path().join("subs").exists());
}
