//! Canned API payloads and manifests.

use serde_json::{Value, json};

/// A secret manifest as a user would write it.
pub const SECRET_MANIFEST: &str = "\
apiVersion: v1beta
kind: Secret
metadata:
  name: aws-credentials
data:
  env_vars:
    - name: AWS_ACCESS_KEY_ID
      value: AKIA123
    - name: AWS_SECRET_ACCESS_KEY
      value: s3cr3t
  files:
    - path: /home/semaphore/.aws/config
      content: W2RlZmF1bHRdCnJlZ2lvbiA9IGV1LXdlc3QtMQo=
";

/// A job manifest.
pub const JOB_MANIFEST: &str = "\
apiVersion: v1alpha
kind: Job
metadata:
  name: one-off
spec:
  project_id: 3f0c8b6e
  agent:
    machine:
      type: e1-standard-2
      os_image: ubuntu2004
  commands:
    - make test
";

/// Secret as returned by the API; `id` is omitted when `None`.
#[must_use]
pub fn secret_payload(name: &str, id: Option<&str>) -> Value {
    let mut metadata = json!({
        "name": name,
        "create_time": "1700000000",
        "update_time": "1700000600"
    });
    if let Some(id) = id {
        metadata["id"] = json!(id);
    }
    json!({
        "metadata": metadata,
        "data": {
            "env_vars": [{"name": "TOKEN", "value": "abc"}],
            "files": []
        }
    })
}

/// `GET /secrets` body for the given names.
#[must_use]
pub fn secret_list_payload(names: &[&str]) -> Value {
    let secrets: Vec<Value> = names
        .iter()
        .map(|name| secret_payload(name, None))
        .collect();
    json!({ "secrets": secrets })
}

/// Job as returned by the API.
#[must_use]
pub fn job_payload(id: &str, name: &str, state: &str) -> Value {
    json!({
        "metadata": {
            "name": name,
            "id": id,
            "create_time": "1700000000",
            "start_time": "1700000010"
        },
        "spec": {
            "project_id": "3f0c8b6e",
            "agent": {"machine": {"type": "e1-standard-2", "os_image": "ubuntu2004"}},
            "commands": ["make test"]
        },
        "status": {
            "state": state,
            "result": if state == "FINISHED" { "PASSED" } else { "" },
            "agent": {"ip": "10.0.0.4", "ports": [{"name": "ssh", "number": 22}]}
        }
    })
}

/// `GET /jobs` body for `(id, name, state)` triples.
#[must_use]
pub fn job_list_payload(jobs: &[(&str, &str, &str)]) -> Value {
    let jobs: Vec<Value> = jobs
        .iter()
        .map(|(id, name, state)| job_payload(id, name, state))
        .collect();
    json!({ "jobs": jobs })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_payload_includes_id_only_when_given() {
        assert!(secret_payload("a", None)["metadata"].get("id").is_none());
        assert_eq!(secret_payload("a", Some("x1"))["metadata"]["id"], "x1");
    }

    #[test]
    fn job_list_payload_preserves_order() {
        let list = job_list_payload(&[("1", "a", "RUNNING"), ("2", "b", "FINISHED")]);
        assert_eq!(list["jobs"][0]["metadata"]["id"], "1");
        assert_eq!(list["jobs"][1]["status"]["result"], "PASSED");
    }
}
