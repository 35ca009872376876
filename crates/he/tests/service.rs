// End-to-end scenarios through the JSON interface of the service.
use he::paillier::PaillierParametersBuilder;
use he::service::{HeService, HeServiceBuilder};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::{json, Value};
use std::error::Error;

fn service(seed: u64) -> Result<HeService, Box<dyn Error>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Ok(HeServiceBuilder::new()
        .set_paillier_parameters(
            &PaillierParametersBuilder::new()
                .set_modulus_size(512)
                .build_arc()?,
        )
        .build_with_rng(&mut rng)?)
}

fn call(service: &HeService, request: Value) -> Result<Value, Box<dyn Error>> {
    Ok(serde_json::from_str(
        &service.handle_json(&request.to_string()),
    )?)
}

#[test]
fn paillier_over_json() -> Result<(), Box<dyn Error>> {
    let service = service(0)?;

    let a = call(&service, json!({"op": "encrypt", "data": "10"}))?;
    assert_eq!(a["scheme"], "paillier");
    assert_eq!(a["encryptedData"]["scheme"], "paillier");
    assert!(a["encryptedData"]["parameters"]["n"].is_string());
    assert!(a["timestamp"].is_string());
    let b = call(&service, json!({"op": "encrypt", "data": "5", "scheme": "paillier"}))?;

    let sum = call(
        &service,
        json!({"op": "add", "encryptedA": a["encryptedData"], "encryptedB": b["encryptedData"]}),
    )?;
    assert_eq!(sum["operation"], "homomorphic_addition");
    assert_eq!(sum["result"]["operation"], "homomorphic_addition");
    let decrypted = call(
        &service,
        json!({"op": "decrypt", "encryptedData": sum["result"]["encryptedResult"]}),
    )?;
    assert_eq!(decrypted["decryptedData"], "15");

    let product = call(
        &service,
        json!({"op": "multiply", "encryptedData": a["encryptedData"], "scalar": 3}),
    )?;
    assert_eq!(product["operation"], "homomorphic_scalar_multiplication");
    let decrypted = call(
        &service,
        json!({"op": "decrypt", "encryptedData": product["result"]["encryptedResult"]}),
    )?;
    assert_eq!(decrypted["decryptedData"], "30");
    Ok(())
}

#[test]
fn toy_schemes_over_json() -> Result<(), Box<dyn Error>> {
    let service = service(1)?;

    let ckks = call(&service, json!({"op": "ckks-encrypt", "data": [1.5, 2.3, 3.7]}))?;
    assert_eq!(ckks["slotCount"], 3);
    assert_eq!(ckks["encryptedData"]["scheme"], "ckks");
    assert_eq!(
        ckks["encryptedData"]["ciphertext"].as_array().map(Vec::len),
        Some(4096)
    );
    let decrypted = call(
        &service,
        json!({"op": "ckks-decrypt", "encryptedData": ckks["encryptedData"]}),
    )?;
    assert_eq!(decrypted["decryptedData"], json!([1.5, 2.3, 3.7]));

    let bfv = call(&service, json!({"op": "bfv-encrypt", "data": ["42", "100", "255"]}))?;
    assert_eq!(bfv["encryptedData"]["scheme"], "bfv");
    let decrypted = call(
        &service,
        json!({"op": "bfv-decrypt", "encryptedData": bfv["encryptedData"]}),
    )?;
    assert_eq!(
        decrypted["decryptedData"],
        json!(["42", "100", "255", "0", "0", "0", "0", "0", "0", "0"])
    );

    // The generic decrypt dispatches on the scheme tag.
    let decrypted = call(
        &service,
        json!({"op": "decrypt", "encryptedData": bfv["encryptedData"]}),
    )?;
    assert_eq!(decrypted["decryptedData"][2], "255");

    let product = call(
        &service,
        json!({"op": "multiply-ciphertexts", "encryptedA": bfv["encryptedData"], "encryptedB": bfv["encryptedData"]}),
    )?;
    assert_eq!(product["operation"], "homomorphic_multiplication");
    assert_eq!(product["result"]["encryptedResult"]["scheme"], "bfv");
    Ok(())
}

#[test]
fn batch_and_status() -> Result<(), Box<dyn Error>> {
    let service = service(2)?;

    let batch = call(
        &service,
        json!({"op": "batch-encrypt", "data": ["1", "2", "3"]}),
    )?;
    assert_eq!(batch["count"], 3);
    for (i, ct) in batch["encryptedData"]
        .as_array()
        .ok_or("missing ciphertexts")?
        .iter()
        .enumerate()
    {
        let decrypted = call(&service, json!({"op": "decrypt", "encryptedData": ct}))?;
        assert_eq!(decrypted["decryptedData"], (i + 1).to_string());
    }

    let batch = call(
        &service,
        json!({"op": "batch-encrypt", "data": ["1.5", "2"], "scheme": "ckks"}),
    )?;
    assert_eq!(batch["count"], 2);
    assert_eq!(batch["encryptedData"][0]["slotCount"], 1);

    let status = call(&service, json!({"op": "status"}))?;
    assert_eq!(status["status"], "operational");
    assert_eq!(status["schemes"], json!(["paillier", "ckks", "bfv"]));
    assert_eq!(status["validation"], true);
    assert!(status.get("error").is_none());
    Ok(())
}

#[test]
fn key_rotation() -> Result<(), Box<dyn Error>> {
    let service = service(3)?;
    let before = call(&service, json!({"op": "encrypt", "data": "7"}))?;

    let rotated = call(&service, json!({"op": "rotate-keys"}))?;
    let n = rotated["publicKey"]["n"].as_str().ok_or("missing modulus")?;
    assert_ne!(n, before["encryptedData"]["parameters"]["n"]);

    let after = call(&service, json!({"op": "encrypt", "data": "7"}))?;
    assert_eq!(after["encryptedData"]["parameters"]["n"], n);
    let decrypted = call(
        &service,
        json!({"op": "decrypt", "encryptedData": after["encryptedData"]}),
    )?;
    assert_eq!(decrypted["decryptedData"], "7");
    Ok(())
}

#[test]
fn failures_are_reported() -> Result<(), Box<dyn Error>> {
    let service = service(4)?;
    let paillier = call(&service, json!({"op": "encrypt", "data": "1"}))?;
    let bfv = call(&service, json!({"op": "bfv-encrypt", "data": ["1"]}))?;

    for (request, prefix) in [
        (json!({"op": "encrypt", "data": "-1"}), "Encryption failed"),
        (json!({"op": "encrypt", "data": "abc"}), "Encryption failed"),
        (json!({"op": "bfv-encrypt", "data": ["-5"]}), "Encryption failed"),
        (
            json!({"op": "add", "encryptedA": paillier["encryptedData"], "encryptedB": bfv["encryptedData"]}),
            "Scheme mismatch",
        ),
        (
            json!({"op": "multiply-ciphertexts", "encryptedA": paillier["encryptedData"], "encryptedB": paillier["encryptedData"]}),
            "Homomorphic evaluation failed",
        ),
        (
            json!({"op": "multiply", "encryptedData": paillier["encryptedData"], "scalar": 2.5}),
            "Homomorphic evaluation failed",
        ),
        (json!({"op": "unknown"}), "Serialization error"),
    ] {
        let response = call(&service, request.clone())?;
        let error = response["error"].as_str().ok_or("missing error")?;
        assert!(error.starts_with(prefix), "{request}: {error}");
        assert!(response["timestamp"].is_string());
    }
    Ok(())
}

#[test]
fn keys_must_be_generated() -> Result<(), Box<dyn Error>> {
    let service = HeServiceBuilder::new()
        .set_paillier_parameters(
            &PaillierParametersBuilder::new()
                .set_modulus_size(256)
                .build_arc()?,
        )
        .set_generate_keys(false)
        .build()?;

    let status = call(&service, json!({"op": "status"}))?;
    assert_eq!(status["status"], "error");
    assert_eq!(status["validation"], false);
    assert_eq!(status["error"], "Homomorphic encryption keys not initialized");

    let response = call(&service, json!({"op": "encrypt", "data": "1"}))?;
    assert_eq!(response["error"], "Homomorphic encryption keys not initialized");

    call(&service, json!({"op": "rotate-keys"}))?;
    let status = call(&service, json!({"op": "status"}))?;
    assert_eq!(status["status"], "operational");
    Ok(())
}

#[test]
fn oversized_slot_count_is_rejected() -> Result<(), Box<dyn Error>> {
    let service = service(5)?;
    let mut ckks = call(&service, json!({"op": "ckks-encrypt", "data": [1.5]}))?;
    ckks["encryptedData"]["slotCount"] = json!(4611686018427387904u64);

    let response = call(
        &service,
        json!({"op": "multiply", "encryptedData": ckks["encryptedData"], "scalar": 2}),
    )?;
    let error = response["error"].as_str().ok_or("missing error")?;
    assert!(error.starts_with("Homomorphic evaluation failed"), "{error}");

    let response = call(
        &service,
        json!({"op": "ckks-decrypt", "encryptedData": ckks["encryptedData"]}),
    )?;
    assert!(response["error"].is_string());
    Ok(())
}

#[test]
fn rotation_reports_the_installed_key() -> Result<(), Box<dyn Error>> {
    let service = service(6)?;
    let public_key = service.regenerate_keys()?;
    assert_eq!(public_key, service.paillier().public_key()?);
    Ok(())
}
