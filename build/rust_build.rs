// Copyright (C) 2025 Kashin Vladislav (Rust adaptation author)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::Path;

use thiserror::Error;

const PROTO_DIR: &str = "resources";
const METADATA_PROTO: &str = "resources/phonemetadata.proto";

#[derive(Debug, Error)]
enum BuildError {
    #[error("Metadata schema is missing at '{0}'")]
    MissingSchema(String),
}

fn main() -> Result<(), BuildError> {
    if !Path::new(METADATA_PROTO).exists() {
        return Err(BuildError::MissingSchema(METADATA_PROTO.to_owned()));
    }
    println!("cargo:rerun-if-changed={}", METADATA_PROTO);

    protobuf_codegen::Codegen::new()
        .pure()
        .includes([PROTO_DIR])
        .input(METADATA_PROTO)
        .cargo_out_dir("proto_gen")
        .run_from_script();
    Ok(())
}
