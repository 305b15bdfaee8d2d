/*!
Test Harness pour l'inspecteur z/VM

Facilite l'écriture de tests avec:
- Setup automatique du mock SDK
- Expectations sur le nombre d'appels SDK
- Statistiques des appels collectés
*/

use crate::sdk_stub::{MockGuestApi, SdkOperation};
use anyhow::Result;
use std::collections::HashMap;
use zvm_inspector::inspector::ZvmInspector;

/// Harness de test: un ZvmInspector branché sur un MockGuestApi partagé
pub struct TestHarness {
    pub api: MockGuestApi,
    pub inspector: ZvmInspector<MockGuestApi>,
    expectations: Vec<Expectation>,
}

#[derive(Debug)]
struct Expectation {
    operation: SdkOperation,
    expected_count: usize,
}

impl TestHarness {
    /// Crée un nouveau harness de test
    pub fn new() -> Self {
        env_logger::builder().is_test(true).try_init().ok(); // Init logging pour tests

        let api = MockGuestApi::new();
        Self {
            inspector: ZvmInspector::new(api.clone()),
            api,
            expectations: Vec::new(),
        }
    }

    /// Ajoute une expectation: on s'attend à N appels d'une opération SDK
    pub fn expect_calls(&mut self, operation: SdkOperation, count: usize) -> &mut Self {
        self.expectations.push(Expectation {
            operation,
            expected_count: count,
        });
        self
    }

    /// Vérifie toutes les expectations configurées
    pub fn verify_expectations(&self) -> Result<()> {
        log::info!("Verifying {} expectations...", self.expectations.len());

        for expectation in &self.expectations {
            let actual_count = self.api.call_count(expectation.operation);
            if actual_count != expectation.expected_count {
                anyhow::bail!(
                    "Expectation failed for {}: expected {} calls, got {}",
                    expectation.operation.func_name(),
                    expectation.expected_count,
                    actual_count
                );
            }
        }

        Ok(())
    }

    /// Assert qu'aucun appel SDK n'a été fait
    pub fn assert_no_sdk_calls(&self) -> Result<()> {
        let calls = self.api.calls();
        if !calls.is_empty() {
            anyhow::bail!("Expected no SDK calls, got {:?}", calls);
        }
        Ok(())
    }

    /// Stats sur les appels collectés
    pub fn get_stats(&self) -> TestStats {
        let calls = self.api.calls();
        let mut operation_counts = HashMap::new();

        for call in &calls {
            *operation_counts.entry(call.operation.func_name()).or_insert(0) += 1;
        }

        TestStats {
            total_calls: calls.len(),
            operation_counts,
        }
    }

    /// Reset le harness pour un nouveau test
    pub fn reset(&mut self) {
        self.api.clear();
        self.expectations.clear();
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct TestStats {
    pub total_calls: usize,
    pub operation_counts: HashMap<&'static str, usize>,
}
