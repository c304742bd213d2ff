//! Schema fixtures shared by the unit tests of this crate.

use terradex_shared::SchemaModel;

/// Two providers: `aws` with one resource, one data source and two functions,
/// and `google`, whose names share nothing with `aws`.
pub(crate) const SAMPLE_SCHEMA: &str = r#"{
    "format_version": "1.0",
    "provider_schemas": {
        "aws": {
            "resource_schemas": {
                "aws_instance": {
                    "version": 1,
                    "block": {
                        "attributes": {
                            "instance_type": {}
                        }
                    }
                },
                "aws_s3_bucket": {
                    "version": 0,
                    "block": {
                        "attributes": {
                            "bucket": {
                                "type": "string",
                                "description": "Name of the bucket.",
                                "description_kind": "plain",
                                "optional": true,
                                "computed": true
                            },
                            "tags": {
                                "type": ["map", "string"],
                                "optional": true
                            }
                        }
                    }
                }
            },
            "data_source_schemas": {
                "aws_ami": {
                    "version": 0,
                    "block": {
                        "attributes": {
                            "owners": {
                                "type": ["list", "string"],
                                "description": "AMI owners.",
                                "required": true
                            }
                        }
                    }
                }
            },
            "functions": {
                "arn_parse": {
                    "summary": "Parse an ARN",
                    "return_type": ["object", { "service": "string" }]
                },
                "arn_build": {
                    "description": "Builds an ARN from its parts.",
                    "return_type": "string",
                    "parameters": [
                        { "name": "partition", "type": "string", "description": "AWS partition." },
                        { "name": "service", "type": "string" }
                    ]
                }
            }
        },
        "google": {
            "resource_schemas": {
                "compute_network": {
                    "version": 0,
                    "block": { "attributes": { "name": { "type": "string", "required": true } } }
                }
            }
        }
    }
}"#;

pub(crate) fn sample_schema() -> SchemaModel {
    serde_json::from_str(SAMPLE_SCHEMA).expect("sample schema parses")
}
