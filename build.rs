fn main() {
    println!("cargo:rerun-if-env-changed=SMARTLIGHT_WIFI_SSID");
    println!("cargo:rerun-if-env-changed=SMARTLIGHT_WIFI_PASSWORD");
    println!("cargo:rerun-if-env-changed=SMARTLIGHT_MQTT_URL");
    println!("cargo:rerun-if-env-changed=SMARTLIGHT_TOPIC_PREFIX");

    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
