//! Registers two types, encodes them, and decodes a mix of valid and invalid
//! envelopes, branching on the error kind.
//!
//! ```sh
//! cargo run -p registry --example roundtrip
//! ```

use encodable::{BoxError, Encodable, Value, serde_data};
use registry::Registry;
use registry::error::Error;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct User {
    name: String,
    age: u32,
}

impl Encodable for User {
    const NAME: &'static str = "User";

    fn to_structured_data(&self) -> Result<Value, BoxError> {
        serde_data::to_data(self)
    }

    fn from_structured_data(data: Value) -> Result<Self, BoxError> {
        serde_data::from_data(data)
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Session {
    user: String,
    expires_at: u64,
}

impl Encodable for Session {
    const NAME: &'static str = "Session";

    fn to_structured_data(&self) -> Result<Value, BoxError> {
        serde_data::to_data(self)
    }

    fn from_structured_data(data: Value) -> Result<Self, BoxError> {
        serde_data::from_data(data)
    }
}

fn main() -> Result<(), Error> {
    let registry = Registry::new();
    registry.register_type::<User>()?;

    let user = User {
        name: "alice".to_string(),
        age: 30,
    };
    let text = registry.dumps(&user)?;
    println!("encoded: {text}");

    let decoded: User = registry.loads_as(&text)?;
    println!("decoded: {decoded:?}");

    let session = registry.dumps(&Session {
        user: "alice".to_string(),
        expires_at: 1_700_000_000,
    })?;

    let inputs = [
        session.as_str(),
        "not json",
        r#"["User"]"#,
        r#"["User",{"name":"bob"}]"#,
    ];
    for input in inputs {
        match registry.loads(input) {
            Ok(obj) => println!("{input}: decoded {}", obj.type_name()),
            Err(Error::NotRegistered(name)) => {
                println!("{input}: {name} is not registered, registering and retrying");
                registry.register_type::<Session>()?;
                let obj = registry.loads(input)?;
                println!("{input}: decoded {}", obj.type_name());
            }
            Err(err) if err.is_malformed_text() || err.is_envelope_shape() => {
                println!("{input}: rejected input: {err}");
            }
            Err(err) => println!("{input}: bug in type conversions: {err}"),
        }
    }

    Ok(())
}
